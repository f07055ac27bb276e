//! Small macros shared by the actix applications.

#[cfg(feature = "actix")]
#[doc(hidden)]
pub use actix_web as __actix_web;

/// Generate a `pub fn routes(config: &mut ServiceConfig)` for a module.
///
/// `route` entries register an attribute-routed handler, `module` entries
/// delegate to the `routes` function of a child module. Registration follows
/// declaration order, which matters for overlapping path patterns.
///
/// ```ignore
/// macros_utils::routes! {
///     module health,
///     route dashboard_page,
/// }
/// ```
#[cfg(feature = "actix")]
#[macro_export]
macro_rules! routes {
    ($($kind:ident $name:ident),* $(,)?) => {
        pub fn routes(config: &mut $crate::__actix_web::web::ServiceConfig) {
            $($crate::routes!(@register config, $kind $name);)*
        }
    };
    (@register $config:ident, route $name:ident) => {
        $config.service($name);
    };
    (@register $config:ident, module $name:ident) => {
        $config.configure($name::routes);
    };
}
