//! Journal - Transaction audit log
//!
//! Records every balance change as one CSV row for complete auditability,
//! and doubles as the recovery source: replaying the journal from the start
//! rebuilds the full balance state.
//!
//! A transfer produces two rows (debit + credit) under a single transaction
//! ID; both rows are written in one buffered write so a crash cannot leave a
//! half-recorded transfer behind a flush boundary.

use chrono::{DateTime, Utc};
use rustc_hash::FxHashMap;
use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;
use std::str::FromStr;

use crate::balance::Balance;
use crate::core_types::{AccountId, Amount, TxnId};

const CSV_HEADER: &str = "txn_id,op,account_id,delta,balance_after,at";

/// Kind of balance change a journal row records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JournalOp {
    /// External funds entering the ledger
    Deposit,
    /// Transfer leg removing funds from the source account
    Debit,
    /// Transfer leg adding funds to the destination account
    Credit,
}

impl JournalOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            JournalOp::Deposit => "deposit",
            JournalOp::Debit => "debit",
            JournalOp::Credit => "credit",
        }
    }
}

impl fmt::Display for JournalOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for JournalOp {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "deposit" => Ok(JournalOp::Deposit),
            "debit" => Ok(JournalOp::Debit),
            "credit" => Ok(JournalOp::Credit),
            _ => Err(format!("Invalid journal op: {}", s)),
        }
    }
}

/// One balance change, as recorded in the journal
#[derive(Debug, Clone)]
pub struct JournalEntry {
    pub txn_id: TxnId,
    pub op: JournalOp,
    pub account_id: AccountId,
    pub delta: Amount,
    pub balance_after: Amount,
    pub at: DateTime<Utc>,
}

impl JournalEntry {
    fn to_csv_line(&self) -> String {
        format!(
            "{},{},{},{},{},{}\n",
            self.txn_id,
            self.op,
            self.account_id,
            self.delta,
            self.balance_after,
            self.at.to_rfc3339()
        )
    }

    fn parse(line: &str, line_num: usize) -> io::Result<Self> {
        let corrupt = |detail: &str| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Journal corruption at line {}: {}", line_num, detail),
            )
        };

        let parts: Vec<&str> = line.split(',').collect();
        if parts.len() < 6 {
            return Err(corrupt("expected 6 fields"));
        }

        Ok(JournalEntry {
            txn_id: parts[0].parse().map_err(|_| corrupt("bad txn_id"))?,
            op: parts[1].parse().map_err(|_| corrupt("bad op"))?,
            account_id: AccountId::parse_str(parts[2]).map_err(|_| corrupt("bad account_id"))?,
            delta: parts[3].parse().map_err(|_| corrupt("bad delta"))?,
            balance_after: parts[4].parse().map_err(|_| corrupt("bad balance_after"))?,
            at: DateTime::parse_from_rfc3339(parts[5])
                .map_err(|_| corrupt("bad timestamp"))?
                .with_timezone(&Utc),
        })
    }
}

/// Balance state rebuilt from a journal
#[derive(Debug)]
pub struct RecoveredState {
    pub accounts: FxHashMap<AccountId, Balance>,
    pub next_txn_id: TxnId,
    pub entry_count: u64,
}

/// Rebuild balances by replaying every journal row in order.
///
/// A missing journal file is an empty ledger, not an error. Rows that cannot
/// be applied (underflow, overflow) mean the file was edited or truncated
/// mid-row and surface as `InvalidData`.
pub fn replay(path: &Path) -> io::Result<RecoveredState> {
    let mut state = RecoveredState {
        accounts: FxHashMap::default(),
        next_txn_id: 1,
        entry_count: 0,
    };

    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(state),
        Err(e) => return Err(e),
    };

    let reader = BufReader::new(file);
    for (idx, line) in reader.lines().enumerate().skip(1) {
        let line = line?;
        if line.is_empty() {
            continue;
        }
        let entry = JournalEntry::parse(&line, idx + 1)?;

        let balance = state.accounts.entry(entry.account_id).or_default();
        let applied = match entry.op {
            JournalOp::Deposit | JournalOp::Credit => balance.deposit(entry.delta),
            JournalOp::Debit => balance.withdraw(entry.delta),
        };
        applied.map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Journal corruption at line {}: {}", idx + 1, e),
            )
        })?;

        if balance.avail() != entry.balance_after {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "Journal corruption at line {}: balance_after {} != replayed {}",
                    idx + 1,
                    entry.balance_after,
                    balance.avail()
                ),
            ));
        }

        state.next_txn_id = state.next_txn_id.max(entry.txn_id + 1);
        state.entry_count += 1;
    }

    Ok(state)
}

/// Appends journal entries to a CSV file
pub struct JournalWriter {
    file: File,
    entry_count: u64,
}

impl JournalWriter {
    /// Open (or create) the journal at the given path for appending.
    /// Writes the CSV header when the file is new.
    pub fn open(path: &Path) -> io::Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        if file.metadata()?.len() == 0 {
            writeln!(file, "{}", CSV_HEADER)?;
        }

        Ok(JournalWriter {
            file,
            entry_count: 0,
        })
    }

    /// Write a single journal entry
    pub fn append(&mut self, entry: &JournalEntry) -> io::Result<()> {
        self.file.write_all(entry.to_csv_line().as_bytes())?;
        self.entry_count += 1;
        Ok(())
    }

    /// Write a transfer's debit and credit rows in one write
    pub fn append_pair(&mut self, debit: &JournalEntry, credit: &JournalEntry) -> io::Result<()> {
        let mut buf = debit.to_csv_line();
        buf.push_str(&credit.to_csv_line());
        self.file.write_all(buf.as_bytes())?;
        self.entry_count += 2;
        Ok(())
    }

    /// Number of entries written by this writer (excludes replayed history)
    pub fn entry_count(&self) -> u64 {
        self.entry_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn test_journal_path(tag: &str) -> PathBuf {
        let dir = PathBuf::from(format!(
            "target/test_journal_{}_{:?}",
            std::process::id(),
            std::thread::current().id()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        dir.join(format!("{}.csv", tag))
    }

    fn entry(txn_id: TxnId, op: JournalOp, account: AccountId, delta: u64, after: u64) -> JournalEntry {
        JournalEntry {
            txn_id,
            op,
            account_id: account,
            delta,
            balance_after: after,
            at: Utc::now(),
        }
    }

    #[test]
    fn test_replay_missing_file_is_empty_ledger() {
        let state = replay(Path::new("target/does_not_exist_journal.csv")).unwrap();
        assert!(state.accounts.is_empty());
        assert_eq!(state.next_txn_id, 1);
    }

    #[test]
    fn test_write_then_replay() {
        let path = test_journal_path("write_then_replay");
        let _ = std::fs::remove_file(&path);

        let alice = AccountId::new_v4();
        let bob = AccountId::new_v4();

        let mut writer = JournalWriter::open(&path).unwrap();
        writer
            .append(&entry(1, JournalOp::Deposit, alice, 1000, 1000))
            .unwrap();
        writer
            .append_pair(
                &entry(2, JournalOp::Debit, alice, 400, 600),
                &entry(2, JournalOp::Credit, bob, 400, 400),
            )
            .unwrap();
        assert_eq!(writer.entry_count(), 3);
        drop(writer);

        let state = replay(&path).unwrap();
        assert_eq!(state.entry_count, 3);
        assert_eq!(state.next_txn_id, 3);
        assert_eq!(state.accounts.get(&alice).unwrap().avail(), 600);
        assert_eq!(state.accounts.get(&bob).unwrap().avail(), 400);
    }

    #[test]
    fn test_replay_detects_corruption() {
        let path = test_journal_path("corrupt");
        let _ = std::fs::remove_file(&path);

        let alice = AccountId::new_v4();
        let mut writer = JournalWriter::open(&path).unwrap();
        // A debit with no prior deposit cannot replay
        writer
            .append(&entry(1, JournalOp::Debit, alice, 100, 0))
            .unwrap();
        drop(writer);

        let err = replay(&path).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn test_reopen_appends_after_existing_rows() {
        let path = test_journal_path("reopen");
        let _ = std::fs::remove_file(&path);

        let alice = AccountId::new_v4();
        {
            let mut writer = JournalWriter::open(&path).unwrap();
            writer
                .append(&entry(1, JournalOp::Deposit, alice, 500, 500))
                .unwrap();
        }
        {
            let mut writer = JournalWriter::open(&path).unwrap();
            writer
                .append(&entry(2, JournalOp::Deposit, alice, 250, 750))
                .unwrap();
        }

        let state = replay(&path).unwrap();
        assert_eq!(state.entry_count, 2);
        assert_eq!(state.accounts.get(&alice).unwrap().avail(), 750);
        assert_eq!(state.next_txn_id, 3);
    }
}
