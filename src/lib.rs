//! Addrsift: address column extraction and CSV batch merging
//!
//! Three independent batch passes over CSV exports sitting in fixed directories:
//!
//! 1. **Tokens** -- Pull one column out of a single designated export and write
//!    it to a text file, one value per line, in file order
//! 2. **Wallets** -- Pull one column out of every CSV in a directory, keep the
//!    first occurrence of each value, and write the result in chunks of at most
//!    [`config::CHUNK_SIZE`] lines; consumed inputs are deleted afterwards
//! 3. **Merge** -- Concatenate the data rows of every CSV in a directory under
//!    the header of the first one; consumed inputs are deleted afterwards
//!
//! # Parsing
//!
//! Fields are split by a hand-rolled, quote-aware scanner ([`tokenizer`]) rather
//! than a full CSV reader. It accepts both `""` and `\"` as escaped quotes and
//! keeps its quoted state for the whole line, so an unmatched quote carries
//! through to the end of that line. Header lines are split on bare commas.
//!
//! # Key Modules
//!
//! - [`tokenizer`] -- Field splitting for one line
//! - [`column`] -- Header lookup and per-line column extraction
//! - [`extract`] -- Tokens pass
//! - [`dedup`] -- First-seen address set and the wallets pass
//! - [`merge`] -- Merge pass
//! - [`sources`] -- Input discovery (sorted by name) and cleanup
//! - [`output`] -- Output naming, chunk paths, line writer
//! - [`prompt`] -- Output name prompt, injectable for tests
//! - [`config`] -- Directory names, default columns and constants
//!
//! # Example Usage
//!
//! ```bash
//! # tokens/tokens.csv -> tokens/token_addresses.txt
//! addrsift tokens
//!
//! # wallets/*.csv -> wallets/wallet_addresses[_N].txt
//! addrsift -v wallets --output batch
//!
//! # merge/*.csv -> merge/merged_data.csv
//! addrsift merge --keep-inputs
//! ```

pub mod column;
pub mod config;
pub mod dedup;
pub mod extract;
pub mod merge;
pub mod output;
pub mod progress;
pub mod prompt;
pub mod sources;
pub mod tokenizer;
