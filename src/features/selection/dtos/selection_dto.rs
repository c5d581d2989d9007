use serde::Deserialize;

/// Query parameters for the selection page
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SelectionQuery {
    /// Echoed back as-is; not checked against the option list
    pub selected: Option<String>,
}
