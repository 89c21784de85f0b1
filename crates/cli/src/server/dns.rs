use std::sync::Arc;
use stub_dns_application::use_cases::ResolveQueryUseCase;
use stub_dns_domain::Config;
use stub_dns_infrastructure::dns::{DnsServerHandler, UdpListener};
use tokio_util::sync::CancellationToken;
use tracing::info;

pub async fn start_dns_server(config: &Config, shutdown: CancellationToken) -> anyhow::Result<()> {
    let transport = config.transport()?;
    let ruleset = Arc::new(config.ruleset());

    info!(
        rules = ruleset.len(),
        default_action = %ruleset.default_action(),
        "Policy loaded"
    );
    for rule in ruleset.rules() {
        info!(name = %rule.name, action = %rule.action, "Policy rule");
    }

    let handler = DnsServerHandler::new(Arc::new(ResolveQueryUseCase::new(ruleset)));

    let listener = UdpListener::bind(&transport)?;
    listener.serve(Arc::new(handler), shutdown).await?;

    Ok(())
}
