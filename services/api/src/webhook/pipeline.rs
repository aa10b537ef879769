use postgres_models::{NewTransaction, Transaction};
use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;

use super::envelope::InboundMessage;
use super::outcome::Outcome;
use crate::command::{self, ParsedCommand};
use crate::store::{LedgerStore, StoreResult};

/// Resolve the sender, parse the command, write the transaction. Strictly in
/// that order: an unlinked number is reported before a malformed command.
pub async fn ingest(store: Arc<dyn LedgerStore>, message: InboundMessage) -> Outcome {
    info!(sender = %message.sender, body = %message.body, "inbound chat message");

    let Some(account_id) = resolve_account(store.as_ref(), &message.sender).await else {
        return Outcome::AccountNotFound;
    };

    let parsed = match command::parse(&message.body) {
        Ok(parsed) => parsed,
        Err(err) => {
            info!(%account_id, error = %err, "rejected chat command");
            return err.into();
        }
    };

    match record(store.as_ref(), account_id, parsed).await {
        Ok(transaction) => {
            info!(
                %account_id,
                transaction_id = %transaction.id,
                kind = %transaction.kind,
                amount = transaction.amount,
                category = %transaction.category,
                "recorded transaction from chat"
            );
            Outcome::Recorded
        }
        Err(err) => {
            error!(%account_id, error = %err, "failed to insert chat transaction");
            Outcome::WriteFailed
        }
    }
}

/// Exactly one linked account, or nothing. Two accounts sharing a number is a
/// data integrity problem and is treated like an unknown sender.
pub async fn resolve_account(store: &dyn LedgerStore, phone_number: &str) -> Option<Uuid> {
    match store.account_ids_by_phone(phone_number, 2).await {
        Ok(ids) => match ids.as_slice() {
            [account_id] => Some(*account_id),
            [] => {
                warn!(phone_number, "no account linked to sender");
                None
            }
            _ => {
                error!(phone_number, "sender phone is linked to more than one account");
                None
            }
        },
        Err(err) => {
            error!(phone_number, error = %err, "account lookup failed");
            None
        }
    }
}

/// Chat entries are always dated now.
pub async fn record(
    store: &dyn LedgerStore,
    account_id: Uuid,
    parsed: ParsedCommand,
) -> StoreResult<Transaction> {
    let new_transaction = NewTransaction::new(
        account_id,
        parsed.kind,
        parsed.amount,
        parsed.description,
        Some(parsed.category),
    );
    store.insert_transaction(new_transaction).await
}
