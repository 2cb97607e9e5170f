/// Maximum number of addresses per output file in the wallets pass
pub const CHUNK_SIZE: usize = 39_000;

/// Directory holding the single designated token export
pub const TOKENS_DIR: &str = "tokens";

/// File name of the token export inside [`TOKENS_DIR`]
pub const TOKENS_FILE: &str = "tokens.csv";

/// Directory holding wallet exports to deduplicate
pub const WALLETS_DIR: &str = "wallets";

/// Directory holding CSV files to merge
pub const MERGE_DIR: &str = "merge";

pub const TOKEN_COLUMN: &str = "token_address";
pub const WALLET_COLUMN: &str = "wallet_address";

/// Output names used when the prompt is answered with an empty line
pub const DEFAULT_TOKENS_OUTPUT: &str = "token_addresses";
pub const DEFAULT_WALLETS_OUTPUT: &str = "wallet_addresses";
pub const DEFAULT_MERGE_OUTPUT: &str = "merged_data";

pub const TEXT_SUFFIX: &str = ".txt";
pub const CSV_SUFFIX: &str = ".csv";

/// Buffer size for output writers
pub const WRITE_BUFFER: usize = 256 * 1024;
