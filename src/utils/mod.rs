mod date;
mod hyperlink;

pub use date::{format_date_to_human_readable, get_meta_data};
pub use hyperlink::handle_hyperlink;
