mod dashboard;
mod health;
mod monitor;

// Fixed paths first, `/{key}` patterns would shadow them otherwise
macros_utils::routes! {
    module health,
    module dashboard,
    module monitor,
}
