mod data_notice_vm;
mod experiment_vm;
mod time_fmt;

pub use data_notice_vm::{DataNoticeKind, DataNoticeVm, map_data_notice};
pub use experiment_vm::{ChartVm, ExperimentIntent, ExperimentVm};
pub use time_fmt::format_elapsed;
