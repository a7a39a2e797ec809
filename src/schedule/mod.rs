pub(crate) mod clock;
pub(crate) mod deadline;
pub(crate) mod runtime;
