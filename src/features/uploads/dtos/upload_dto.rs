/// Metadata for a file that has just been written to disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUploadedFile {
    pub filename: String,
    pub original_filename: String,
}

/// The `file` part of an upload form
#[derive(Debug, Clone)]
pub struct FilePart {
    /// `None` when the part carried no filename at all
    pub file_name: Option<String>,
    pub data: Vec<u8>,
}
