pub mod html_amount;
pub mod json_extract;
