//! # Static App Check
//!
//! Runs the widget validator, then the app validator over the identifiers
//! the widget registry declared. The two documents are always validated in
//! that order because layouts resolve their references against the
//! registry.

use std::path::Path;

use serde::Serialize;

use boardlint_apps::{AppValidation, AppValidator};
use boardlint_widgets::{WidgetValidation, WidgetValidator};

use crate::{APPS_FILE, WIDGETS_FILE};

/// Combined result of validating both documents of an app directory.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppCheck {
    pub widgets: WidgetValidation,
    pub apps: AppValidation,
}

impl AppCheck {
    /// True when neither document produced an error.
    pub fn is_valid(&self) -> bool {
        self.widgets.is_valid() && self.apps.is_valid()
    }

    pub fn error_count(&self) -> usize {
        self.widgets.report.errors.len() + self.apps.report.errors.len()
    }

    pub fn warning_count(&self) -> usize {
        self.widgets.report.warnings.len() + self.apps.report.warnings.len()
    }
}

/// Validate `widgets.json` in `dir`.
pub fn check_widgets(dir: &Path) -> WidgetValidation {
    WidgetValidator::new().validate_file(&dir.join(WIDGETS_FILE))
}

/// Validate `apps.json` in `dir` against an already validated registry.
///
/// When the registry could not be loaded the layout references cannot be
/// resolved; that is surfaced as a warning on the apps report.
pub fn check_apps(dir: &Path, widgets: &WidgetValidation) -> AppValidation {
    let mut apps = AppValidator::new(&widgets.widget_ids).validate_file(&dir.join(APPS_FILE));
    if !widgets.registry_loaded {
        apps.report.document_warning(
            "widgets.json could not be loaded; widget references were not checked",
        );
    }
    apps
}

/// Validate both documents of the app in `dir`.
pub fn check_app(dir: &Path) -> AppCheck {
    tracing::debug!(dir = %dir.display(), "checking app");
    let widgets = check_widgets(dir);
    let apps = check_apps(dir, &widgets);
    AppCheck { widgets, apps }
}
