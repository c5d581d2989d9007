pub mod feedback;
pub mod selection;
pub mod uploads;
pub mod weather;
