#![cfg(test)]

use crate::test_helpers::*;
use soroban_sdk::testutils::Events;
use soroban_sdk::{Address, Env, FromVal, Symbol, Val, Vec};

/// Returns `(topic_name, data)` of the most recent event published by the vault.
fn last_vault_event(e: &Env, contract_id: &Address) -> (Symbol, Vec<Val>, Val) {
    let events = e.events().all();
    let (_, topics, data) = events
        .into_iter()
        .rev()
        .find(|ev| ev.0 == *contract_id)
        .unwrap();
    let name = Symbol::from_val(e, &topics.get(0).unwrap());
    (name, topics, data)
}

#[test]
fn test_lock_created_event() {
    let e = Env::default();
    let f = setup(&e);
    let amount = 10 * UNIT;

    f.client.lock(&f.owner, &amount, &WINDOW, &20);

    let (name, topics, data) = last_vault_event(&e, &f.contract_id);
    assert_eq!(name, Symbol::new(&e, "lock_created"));
    assert_eq!(Address::from_val(&e, &topics.get(1).unwrap()), f.owner);
    assert_eq!(
        <(u32, i128, u64, u32, u64)>::from_val(&e, &data),
        (0, amount, WINDOW, 20, START + WINDOW)
    );
}

#[test]
fn test_redeem_emits_redeemed() {
    let e = Env::default();
    let f = setup(&e);
    f.client.lock(&f.owner, &(10 * UNIT), &WINDOW, &20);
    set_time(&e, START + WINDOW);

    f.client.redeem(&f.owner, &0);

    let (name, _topics, data) = last_vault_event(&e, &f.contract_id);
    assert_eq!(name, Symbol::new(&e, "redeemed"));
    assert_eq!(<(u32, i128)>::from_val(&e, &data), (0, 10 * UNIT));
}

#[test]
fn test_matured_force_redeem_emits_redeemed_not_force_redeemed() {
    let e = Env::default();
    let f = setup(&e);
    f.client.lock(&f.owner, &(10 * UNIT), &WINDOW, &20);
    set_time(&e, START + WINDOW);

    f.client.force_redeem(&f.owner, &0);

    let (name, _topics, _data) = last_vault_event(&e, &f.contract_id);
    assert_eq!(name, Symbol::new(&e, "redeemed"));
}

#[test]
fn test_early_force_redeem_event_reports_split() {
    let e = Env::default();
    let f = setup(&e);
    f.client.lock(&f.owner, &(10 * UNIT), &WINDOW, &20);

    f.client.force_redeem(&f.owner, &0);

    let (name, _topics, data) = last_vault_event(&e, &f.contract_id);
    assert_eq!(name, Symbol::new(&e, "force_redeemed"));
    assert_eq!(
        <(u32, i128, i128, Address)>::from_val(&e, &data),
        (0, 8 * UNIT, 2 * UNIT, f.penalty_receiver.clone())
    );
}

#[test]
fn test_claim_emits_claimed_with_token_id() {
    let e = Env::default();
    let f = setup(&e);
    f.client.lock(&f.owner, &(10 * UNIT), &WINDOW, &20);
    f.client.force_redeem(&f.owner, &0);

    let token_id = f.client.claim(&f.owner, &0);

    let (name, _topics, data) = last_vault_event(&e, &f.contract_id);
    assert_eq!(name, Symbol::new(&e, "claimed"));
    assert_eq!(<(u32, u64)>::from_val(&e, &data), (0, token_id));
}
