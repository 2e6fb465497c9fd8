use thiserror::Error;

use crate::WidgetId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("widget {0:?} is not a container and cannot own children")]
    NotAContainer(WidgetId),
    #[error("widget handle {0:?} no longer refers to a live widget")]
    StaleWidget(WidgetId),
    #[error("the canvas root cannot be removed")]
    RootRemoval,
}
