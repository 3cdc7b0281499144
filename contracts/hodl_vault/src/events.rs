use soroban_sdk::{Address, Env, Symbol};

/// Emitted when a new lock is created.
///
/// # Topics
/// * `Symbol` - "lock_created"
/// * `Address` - The lock owner
///
/// # Data
/// * `u32` - Index of the new lock
/// * `i128` - Locked amount
/// * `u64` - Lock window in seconds
/// * `u32` - Penalty ratio
/// * `u64` - Unlock timestamp
pub fn emit_lock_created(
    e: &Env,
    owner: &Address,
    index: u32,
    amount: i128,
    lock_window: u64,
    penalty: u32,
    unlock_time: u64,
) {
    let topics = (Symbol::new(e, "lock_created"), owner.clone());
    let data = (index, amount, lock_window, penalty, unlock_time);
    e.events().publish(topics, data);
}

/// Emitted when a lock pays out in full, either through `redeem` or through
/// `force_redeem` after the window elapsed.
///
/// # Topics
/// * `Symbol` - "redeemed"
/// * `Address` - The lock owner
///
/// # Data
/// * `u32` - Lock index
/// * `i128` - Amount returned
pub fn emit_redeemed(e: &Env, owner: &Address, index: u32, amount: i128) {
    let topics = (Symbol::new(e, "redeemed"), owner.clone());
    e.events().publish(topics, (index, amount));
}

/// Emitted when a lock exits early and pays a penalty.
///
/// # Topics
/// * `Symbol` - "force_redeemed"
/// * `Address` - The lock owner
///
/// # Data
/// * `u32` - Lock index
/// * `i128` - Amount returned to the owner
/// * `i128` - Amount forfeited
/// * `Address` - Penalty receiver
pub fn emit_force_redeemed(
    e: &Env,
    owner: &Address,
    index: u32,
    returned: i128,
    forfeited: i128,
    receiver: &Address,
) {
    let topics = (Symbol::new(e, "force_redeemed"), owner.clone());
    let data = (index, returned, forfeited, receiver.clone());
    e.events().publish(topics, data);
}

/// Emitted when a redeemed lock is exchanged for a receipt NFT.
///
/// # Topics
/// * `Symbol` - "claimed"
/// * `Address` - The lock owner
///
/// # Data
/// * `u32` - Lock index
/// * `u64` - Receipt token id
pub fn emit_claimed(e: &Env, owner: &Address, index: u32, token_id: u64) {
    let topics = (Symbol::new(e, "claimed"), owner.clone());
    e.events().publish(topics, (index, token_id));
}

pub fn emit_penalty_receiver_set(e: &Env, receiver: &Address) {
    e.events()
        .publish((Symbol::new(e, "penalty_receiver_set"),), receiver.clone());
}

pub fn emit_max_locks_set(e: &Env, max_locks: u32) {
    e.events()
        .publish((Symbol::new(e, "max_locks_set"),), max_locks);
}

pub fn emit_max_window_set(e: &Env, max_window: u64) {
    e.events()
        .publish((Symbol::new(e, "max_window_set"),), max_window);
}
