//! Tests of the deploy flow against a mock toolkit

use std::sync::Mutex;

use alloy::{
    json_abi::JsonAbi,
    primitives::{address, b256, Address, Bytes, TxHash},
};
use eyre::Result;
use freelance_scripts::{
    cli::DeployArgs,
    deploy_contract,
    errors::ScriptError,
    toolkit::DeployToolkit,
    types::{ContractFactory, DeployedContract, OutputFormat, PendingDeployment},
};
use serde_json::Value;
use tempfile::tempdir;

/// The address the mock toolkit deploys to
const DEPLOYED_ADDRESS: Address = address!("0000000000000000000000000000000000abc123");
/// The hash of the mock deployment transaction
const DEPLOY_TX_HASH: TxHash =
    b256!("00000000000000000000000000000000000000000000000000000000000000aa");

/// A toolkit call, as recorded by the mock
#[derive(Clone, Debug, PartialEq, Eq)]
enum Call {
    ContractFactory(String),
    Deploy(String),
    Deployed(TxHash),
}

/// Which toolkit call the mock fails
#[derive(Clone, Copy, PartialEq, Eq)]
enum FailAt {
    Nowhere,
    ContractFactory,
    Deploy,
    Deployed,
}

/// A toolkit that records its calls and fails at a configured point
struct MockToolkit {
    fail_at: FailAt,
    calls: Mutex<Vec<Call>>,
}

impl MockToolkit {
    fn new(fail_at: FailAt) -> Self {
        Self {
            fail_at,
            calls: Mutex::new(Vec::new()),
        }
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

impl DeployToolkit for MockToolkit {
    async fn contract_factory(&self, contract_name: &str) -> Result<ContractFactory, ScriptError> {
        self.record(Call::ContractFactory(contract_name.to_string()));
        if self.fail_at == FailAt::ContractFactory {
            return Err(ScriptError::ArtifactNotFound(format!("no artifact for `{contract_name}`")));
        }

        Ok(ContractFactory {
            name: contract_name.to_string(),
            abi: JsonAbi::default(),
            bytecode: Bytes::from_static(&[0x60, 0x80, 0x60, 0x40, 0x52]),
        })
    }

    async fn deploy(&self, factory: &ContractFactory) -> Result<PendingDeployment, ScriptError> {
        self.record(Call::Deploy(factory.name.clone()));
        if self.fail_at == FailAt::Deploy {
            return Err(ScriptError::ContractDeployment("connection refused".to_string()));
        }

        Ok(PendingDeployment {
            contract_name: factory.name.clone(),
            tx_hash: DEPLOY_TX_HASH,
        })
    }

    async fn deployed(&self, pending: PendingDeployment) -> Result<DeployedContract, ScriptError> {
        self.record(Call::Deployed(pending.tx_hash));
        if self.fail_at == FailAt::Deployed {
            return Err(ScriptError::TransactionReverted(format!(
                "{} deployment tx {:#x}",
                pending.contract_name, pending.tx_hash
            )));
        }

        Ok(DeployedContract {
            contract_name: pending.contract_name,
            address: DEPLOYED_ADDRESS,
            tx_hash: pending.tx_hash,
        })
    }
}

fn deploy_args(output_format: OutputFormat) -> DeployArgs {
    DeployArgs {
        contract: "Freelance".to_string(),
        output_format,
        deployments: None,
    }
}

#[tokio::test]
async fn test_calls_in_order_once_each() -> Result<()> {
    let toolkit = MockToolkit::new(FailAt::Nowhere);

    let deployed = deploy_contract(&toolkit, "Freelance").await?;

    assert_eq!(deployed.address, DEPLOYED_ADDRESS);
    assert_eq!(deployed.tx_hash, DEPLOY_TX_HASH);
    assert_eq!(
        toolkit.calls(),
        vec![
            Call::ContractFactory("Freelance".to_string()),
            Call::Deploy("Freelance".to_string()),
            Call::Deployed(DEPLOY_TX_HASH),
        ]
    );

    Ok(())
}

#[tokio::test]
async fn test_success_reports_address_once() -> Result<()> {
    let toolkit = MockToolkit::new(FailAt::Nowhere);
    let mut out = Vec::new();

    deploy_args(OutputFormat::Plain).run(&toolkit, &mut out).await?;

    let out = String::from_utf8(out)?;
    assert_eq!(out, format!("Freelance deployed to {DEPLOYED_ADDRESS}\n"));
    assert_eq!(out.matches(&DEPLOYED_ADDRESS.to_string()).count(), 1);
    assert_eq!(out.lines().count(), 1);

    Ok(())
}

#[tokio::test]
async fn test_legacy_report() -> Result<()> {
    let toolkit = MockToolkit::new(FailAt::Nowhere);
    let mut out = Vec::new();

    deploy_args(OutputFormat::Legacy).run(&toolkit, &mut out).await?;

    assert_eq!(
        String::from_utf8(out)?,
        format!("Freelance deployed to ' {DEPLOYED_ADDRESS} \n")
    );

    Ok(())
}

#[tokio::test]
async fn test_factory_failure() -> Result<()> {
    let toolkit = MockToolkit::new(FailAt::ContractFactory);
    let mut out = Vec::new();

    let err = deploy_args(OutputFormat::Plain)
        .run(&toolkit, &mut out)
        .await
        .unwrap_err();

    assert!(err.to_string().contains("artifact not found"));
    assert!(out.is_empty());
    assert_eq!(toolkit.calls(), vec![Call::ContractFactory("Freelance".to_string())]);

    Ok(())
}

#[tokio::test]
async fn test_submission_failure() -> Result<()> {
    let toolkit = MockToolkit::new(FailAt::Deploy);
    let mut out = Vec::new();

    let err = deploy_args(OutputFormat::Plain)
        .run(&toolkit, &mut out)
        .await
        .unwrap_err();

    assert!(matches!(err, ScriptError::ContractDeployment(_)));
    assert!(out.is_empty());
    assert_eq!(toolkit.calls().len(), 2);

    Ok(())
}

#[tokio::test]
async fn test_confirmation_failure() -> Result<()> {
    let toolkit = MockToolkit::new(FailAt::Deployed);
    let mut out = Vec::new();

    let err = deploy_args(OutputFormat::Plain)
        .run(&toolkit, &mut out)
        .await
        .unwrap_err();

    assert!(matches!(err, ScriptError::TransactionReverted(_)));
    assert!(err.to_string().contains("reverted"));
    assert!(out.is_empty());
    assert_eq!(toolkit.calls().len(), 3);

    Ok(())
}

#[tokio::test]
async fn test_records_deployment() -> Result<()> {
    let dir = tempdir()?;
    let deployments_path = dir.path().join("deployments.json");
    let toolkit = MockToolkit::new(FailAt::Nowhere);
    let args = DeployArgs {
        deployments: Some(deployments_path.clone()),
        ..deploy_args(OutputFormat::Plain)
    };

    args.run(&toolkit, &mut Vec::new()).await?;

    let json: Value = serde_json::from_str(&std::fs::read_to_string(&deployments_path)?)?;
    assert_eq!(
        json["deployments"]["Freelance"],
        format!("{DEPLOYED_ADDRESS:#x}")
    );

    Ok(())
}

#[tokio::test]
async fn test_failed_deployment_not_recorded() -> Result<()> {
    let dir = tempdir()?;
    let deployments_path = dir.path().join("deployments.json");
    let toolkit = MockToolkit::new(FailAt::Deployed);
    let args = DeployArgs {
        deployments: Some(deployments_path.clone()),
        ..deploy_args(OutputFormat::Plain)
    };

    assert!(args.run(&toolkit, &mut Vec::new()).await.is_err());
    assert!(!deployments_path.exists());

    Ok(())
}

#[tokio::test]
async fn test_unrecordable_deployment_still_reported() -> Result<()> {
    let dir = tempdir()?;
    let deployments_path = dir.path().join("deployments.json");
    std::fs::write(&deployments_path, "[]")?;
    let toolkit = MockToolkit::new(FailAt::Nowhere);
    let args = DeployArgs {
        deployments: Some(deployments_path.clone()),
        ..deploy_args(OutputFormat::Plain)
    };
    let mut out = Vec::new();

    let err = args.run(&toolkit, &mut out).await.unwrap_err();

    assert!(matches!(err, ScriptError::WriteDeployments(_)));
    assert!(err.to_string().contains(&format!("{DEPLOYED_ADDRESS:#x}")));
    assert_eq!(
        String::from_utf8(out)?,
        format!("Freelance deployed to {DEPLOYED_ADDRESS}\n")
    );
    assert_eq!(std::fs::read_to_string(&deployments_path)?, "[]");

    Ok(())
}
