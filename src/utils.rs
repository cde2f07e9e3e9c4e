pub mod value_formatter;
