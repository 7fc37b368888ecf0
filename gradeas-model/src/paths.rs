use crate::location::Location;

pub const DEFAULT_TAG: &str = "i4x";
pub const TAG_SEPARATOR: &str = "://";
pub const GRADEAS_PATH: &str = "/gradeas/";

pub fn location_path(location: &Location) -> String {
    let [org, course, category, name] = location.fields();
    format!("/{org}/{course}/{category}/{name}")
}

pub fn gradeas_path(location: &Location) -> String {
    format!("{}{GRADEAS_PATH}", location_path(location))
}
