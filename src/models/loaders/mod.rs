pub mod toml_loader;

pub use toml_loader::{
    list_student_files, load_indicator_file, load_student_file, save_student_file, StoredMark,
    StoredObservation, StudentFile,
};
