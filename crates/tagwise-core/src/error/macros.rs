//! Error macros for tagwise

/// Macro for creating invalid value errors
#[macro_export]
macro_rules! bail_invalid {
    ($context:expr, $value:expr) => {
        return Err($crate::error::TagwiseError::invalid_value($context, $value))
    };
}

/// Macro for mapping collaborator store errors
#[macro_export]
macro_rules! map_lookup_err {
    ($store:expr, $error:expr) => {
        $crate::error::TagwiseError::lookup($store, $error)
    };
}
