//! List proxies and their deployments for the configured organization
//!
//! Reads `APIGEE_ORGANIZATION`, `APIGEE_USERNAME` and `APIGEE_PASSWORD` from
//! the environment or a `.env` file.
//!
//! ```sh
//! RUST_LOG=apigee_infra=debug cargo run -p apigee-infra --example list_proxies
//! ```

#![allow(clippy::print_stdout)]

use apigee_infra::logging::init_tracing;
use apigee_infra::Apigee;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing(1)?;

    let apigee = Apigee::from_env()?;
    println!("Organization: {}", apigee.org());

    let proxies = apigee.list_proxies().await?;
    for name in proxies.as_array().into_iter().flatten().filter_map(|p| p.as_str()) {
        let deployments = apigee.proxy_deployments(name).await?;
        let environments: Vec<&str> = deployments["environment"]
            .as_array()
            .into_iter()
            .flatten()
            .filter_map(|env| env["name"].as_str())
            .collect();
        println!("{name:<40} {}", environments.join(", "));
    }

    Ok(())
}
