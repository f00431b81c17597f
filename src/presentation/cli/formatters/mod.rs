pub mod report_fmt;
