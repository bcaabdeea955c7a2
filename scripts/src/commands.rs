//! Implementation of the deploy script

use std::io::Write;

use tracing::{error, info};

use crate::{
    cli::DeployArgs,
    errors::ScriptError,
    toolkit::DeployToolkit,
    types::{DeployedContract, DeploymentStage},
    utils::write_deployed_address,
};

/// Deploys one instance of the named contract through the given toolkit.
///
/// Issues exactly one factory lookup, one deployment submission, and one
/// confirmation wait, in that order. The first failure ends the deployment.
pub async fn deploy_contract(
    toolkit: &impl DeployToolkit,
    contract_name: &str,
) -> Result<DeployedContract, ScriptError> {
    let log_failure = move |stage: DeploymentStage| {
        move |e: &ScriptError| error!(%stage, "{} deployment failed: {}", contract_name, e)
    };

    let factory = toolkit
        .contract_factory(contract_name)
        .await
        .inspect_err(log_failure(DeploymentStage::NotStarted))?;
    info!(stage = %DeploymentStage::FactoryResolved, "Resolved {} factory", contract_name);

    let pending = toolkit
        .deploy(&factory)
        .await
        .inspect_err(log_failure(DeploymentStage::FactoryResolved))?;
    info!(stage = %DeploymentStage::DeploySubmitted, "Submitted {} deployment", contract_name);

    let deployed = toolkit
        .deployed(pending)
        .await
        .inspect_err(log_failure(DeploymentStage::DeploySubmitted))?;
    info!(
        stage = %DeploymentStage::Deployed,
        "{} deployed to {:#x} in tx {:#x}", contract_name, deployed.address, deployed.tx_hash
    );

    Ok(deployed)
}

impl DeployArgs {
    /// Deploy the contract, write the report line to `out`, and record the
    /// deployment if requested.
    ///
    /// The report is written before the deployments file so that a confirmed
    /// address is never lost to a failed record.
    pub async fn run(
        &self,
        toolkit: &impl DeployToolkit,
        out: &mut impl Write,
    ) -> Result<DeployedContract, ScriptError> {
        let deployed = deploy_contract(toolkit, &self.contract).await?;

        writeln!(out, "{}", self.output_format.format(&deployed))
            .and_then(|_| out.flush())
            .map_err(|e| ScriptError::Output(e.to_string()))?;

        if let Some(deployments_path) = &self.deployments {
            write_deployed_address(deployments_path, &deployed.contract_name, deployed.address)
                .map_err(|e| match e {
                    ScriptError::WriteDeployments(msg) => ScriptError::WriteDeployments(format!(
                        "{} deployed to {:#x} but not recorded: {}",
                        deployed.contract_name, deployed.address, msg
                    )),
                    e => e,
                })?;
            info!("Recorded {} in {}", deployed.contract_name, deployments_path.display());
        }

        Ok(deployed)
    }
}
