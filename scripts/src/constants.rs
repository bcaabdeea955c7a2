//! Constants used in the deploy scripts

/// The name of the contract deployed by default
pub const DEFAULT_CONTRACT_NAME: &str = "Freelance";

/// The default RPC URL, a local devnet node
pub const DEFAULT_RPC_URL: &str = "http://localhost:8545";

/// The default private key of the deployer, the first default account in an Anvil node
pub const DEFAULT_PKEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

/// The default directory containing the compiled contract artifacts
pub const DEFAULT_ARTIFACTS_DIR: &str = "artifacts";

/// The number of confirmations to wait for the contract deployment transaction
pub const NUM_DEPLOY_CONFIRMATIONS: u64 = 1;

/// The directory under a Hardhat artifacts root in which contract sources are mirrored
pub const HARDHAT_SOURCES_DIR: &str = "contracts";

/// The extension of a Solidity source file, used to name artifact directories
pub const SOLIDITY_EXTENSION: &str = "sol";

/// The extension of a compilation artifact file
pub const ARTIFACT_EXTENSION: &str = "json";

/// The deployments key in the `deployments.json` file
pub const DEPLOYMENTS_KEY: &str = "deployments";

/// The indentation used when writing the `deployments.json` file
pub const DEPLOYMENTS_INDENT: &[u8] = b"    ";

/// The interval at which to poll for the deployment receipt and new blocks
pub const RECEIPT_POLL_INTERVAL_MS: u64 = 500;
