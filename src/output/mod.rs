mod format;
mod json;
mod table;

pub(crate) use format::plural;
pub(crate) use json::{output_config_json, output_run_json, output_updated_json, output_window_json};
pub(crate) use table::{print_updated_table, print_window_table};
