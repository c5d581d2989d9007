// =============================================================================
// NOTICES
// =============================================================================

pub const NOTICE_FILL_ALL_FIELDS: &str = "Please fill in all fields";
pub const NOTICE_FEEDBACK_SAVED: &str = "Feedback saved";
pub const NOTICE_ENTER_CITY: &str = "Please enter a city";
pub const NOTICE_NO_FILE_PART: &str = "No file part";
pub const NOTICE_NO_SELECTED_FILE: &str = "No selected file";
pub const NOTICE_INVALID_FILENAME: &str = "Invalid file name";
pub const NOTICE_UPLOAD_SUCCESS: &str = "File uploaded successfully";

// =============================================================================
// MOCK WEATHER
// =============================================================================

pub const MOCK_TEMPERATURE: &str = "20°C";
pub const MOCK_DESCRIPTION: &str = "Sunny";

// =============================================================================
// SELECTION
// =============================================================================

/// Options offered on the selection page
pub const SELECTION_OPTIONS: [&str; 3] = ["Option 1", "Option 2", "Option 3"];
