use services::{DataOrigin, LoadedDataset};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DataNoticeKind {
    Success,
    Warning,
}

impl DataNoticeKind {
    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            DataNoticeKind::Success => "alert alert-success",
            DataNoticeKind::Warning => "alert alert-warning",
        }
    }
}

/// Banner describing how the dataset was loaded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataNoticeVm {
    pub kind: DataNoticeKind,
    pub message: String,
    pub details: Option<String>,
    pub rows_label: String,
}

#[must_use]
pub fn map_data_notice(data: &LoadedDataset) -> DataNoticeVm {
    let rows_label = format!("{} passengers loaded", data.dataset.len());
    match &data.origin {
        DataOrigin::Primary { source } => DataNoticeVm {
            kind: DataNoticeKind::Success,
            message: format!("Data successfully loaded from the {source}!"),
            details: None,
            rows_label,
        },
        DataOrigin::Fallback { warning } => DataNoticeVm {
            kind: DataNoticeKind::Warning,
            message: warning.to_string(),
            details: Some(format!("Error details: {}", warning.details)),
            rows_label,
        },
    }
}
