use atoms::{Observable, Subscription};
use tracing::{debug, instrument, warn};

use crate::time::now_ms;
use crate::transaction::model::{TransactionRecord, TransactionStatus};

/// Single slot holding the last submitted swap.
#[derive(Clone, Default)]
pub struct TransactionStore {
    slot: Observable<Option<TransactionRecord>>,
}

impl TransactionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<TransactionRecord> {
        self.slot.read()
    }

    /// Replace whatever the slot holds.
    #[instrument(skip(self, record), target = "transaction", fields(receipt = %record.receipt))]
    pub fn set(&self, record: TransactionRecord) {
        self.slot.write(Some(record));
        debug!("transaction recorded");
    }

    #[instrument(skip(self), target = "transaction")]
    pub fn clear(&self) {
        self.slot.write(None);
    }

    /// Attach the outcome and elapsed time to the held record.
    ///
    /// Returns `false` when the slot is empty.
    #[instrument(skip(self), target = "transaction")]
    pub fn settle(&self, status: TransactionStatus, now_ms: u64) -> bool {
        if self.slot.with(Option::is_none) {
            warn!("no transaction to settle");
            return false;
        }

        let settled = self.slot.update(move |slot| match slot {
            Some(record) => {
                record.elapsed_ms = Some(now_ms.saturating_sub(record.timestamp_ms));
                record.status = Some(status);
                true
            }
            None => false,
        });

        debug!(settled, "transaction outcome attached");
        settled
    }

    /// [`settle`](Self::settle) at the current wall-clock time.
    pub fn settle_now(&self, status: TransactionStatus) -> bool {
        self.settle(status, now_ms())
    }

    pub fn subscribe(
        &self,
        listener: impl Fn(&Option<TransactionRecord>) + Send + Sync + 'static,
    ) -> Subscription {
        self.slot.subscribe(listener)
    }
}
