use std::fmt;
use std::sync::Arc;
use std::sync::Weak;

use tracing::warn;

use crate::delegate::Icon;
use crate::delegate::ReadStatusDelegate;
use crate::value::ReadStatusValue;

/// Text and icon resolved for one layout pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormattedReadStatus {
    pub text: String,
    pub icon: Option<Icon>,
}

/// Current read status of a message plus the delegate that formats it.
///
/// The delegate is held weakly: whoever presents the indicator owns it, and a
/// strong reference here would tie the presenter and its views together.
#[derive(Clone, Default)]
pub struct ReadStatusViewModel {
    value: ReadStatusValue,
    delegate: Option<Weak<dyn ReadStatusDelegate>>,
}

impl ReadStatusViewModel {
    pub fn new(value: ReadStatusValue, delegate: &Arc<dyn ReadStatusDelegate>) -> Self {
        Self {
            value,
            delegate: Some(Arc::downgrade(delegate)),
        }
    }

    pub fn without_delegate(value: ReadStatusValue) -> Self {
        Self {
            value,
            delegate: None,
        }
    }

    pub fn value(&self) -> &ReadStatusValue {
        &self.value
    }

    pub fn set_value(&mut self, value: ReadStatusValue) {
        self.value = value;
    }

    pub fn set_delegate(&mut self, delegate: &Arc<dyn ReadStatusDelegate>) {
        self.delegate = Some(Arc::downgrade(delegate));
    }

    pub fn clear_delegate(&mut self) {
        self.delegate = None;
    }

    /// The delegate, if one was assigned and is still alive.
    pub fn delegate(&self) -> Option<Arc<dyn ReadStatusDelegate>> {
        self.delegate.as_ref().and_then(Weak::upgrade)
    }

    /// Resolves text and icon for the current value.
    ///
    /// Without a live delegate this is empty text and no icon.
    pub fn formatted(&self) -> FormattedReadStatus {
        let Some(delegate) = self.delegate() else {
            if self.delegate.is_some() {
                warn!("read status delegate was dropped before its view model");
            }
            return FormattedReadStatus::default();
        };
        FormattedReadStatus {
            text: delegate.text(&self.value),
            icon: delegate.icon(&self.value),
        }
    }
}

impl fmt::Debug for ReadStatusViewModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReadStatusViewModel")
            .field("value", &self.value)
            .field("has_delegate", &self.delegate().is_some())
            .finish()
    }
}
