#[tokio::main]
async fn main() -> anyhow::Result<()> {
    invoicechain_ledger::server::run().await
}
