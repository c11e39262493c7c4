#![allow(dead_code)]


use klondike_backend::db::txn_policy::{set_txn_policy, TxnPolicy};

#[ctor::ctor]
fn init_logging() {
    backend_test_support::logging::init();
}

// Each test binary owns a fresh in-memory database, so writes commit by
// default; `KLONDIKE_TXN_POLICY=rollback` flips it.
#[ctor::ctor]
fn init_txn_policy() {
    let policy = match std::env::var("KLONDIKE_TXN_POLICY")
        .unwrap_or_default()
        .to_lowercase()
        .as_str()
    {
        "rollback" => TxnPolicy::RollbackOnOk,
        _ => TxnPolicy::CommitOnOk,
    };
    set_txn_policy(policy);
}
