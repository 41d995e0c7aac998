use std::path::Path;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ReadContentError {
    #[error("Failure to read file `{}`: {err}", file_path.display())]
    FileReadError {
        file_path: PathBuf,
        err: std::io::Error,
    },

    #[error("File `{}` is not valid UTF-8", file_path.display())]
    InvalidUtf8 {
        file_path: PathBuf,
    },
}
impl PartialEq for ReadContentError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                Self::FileReadError { file_path: a, err: err_a },
                Self::FileReadError { file_path: b, err: err_b },
            ) => a == b && err_a.kind() == err_b.kind(),
            (
                Self::InvalidUtf8 { file_path: a },
                Self::InvalidUtf8 { file_path: b },
            ) => a == b,
            _ => false,
        }
    }
}

pub(crate) fn read_content<P: AsRef<Path>>(file_path: P) -> Result<String, ReadContentError> {
    let file_path = file_path.as_ref();
    let bytes = std::fs::read(file_path).map_err(|err| ReadContentError::FileReadError {
        file_path: file_path.to_path_buf(),
        err,
    })?;
    String::from_utf8(bytes).map_err(|_| ReadContentError::InvalidUtf8 {
        file_path: file_path.to_path_buf(),
    })
}
