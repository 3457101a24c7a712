//! Network teardown sequencer
//!
//! A VPC cannot be deleted while anything inside it still exists, so the
//! VPC category runs this fixed sequence instead of a single delete call:
//! internet gateways (detach, then delete), subnets, non-main route tables,
//! network interfaces, and finally the VPC itself. Every step is a
//! list-then-delete-all pair scoped to the VPC. Steps are unconditional and
//! not retried; the first error propagates and leaves the VPC partially
//! torn down.

use anyhow::Result;
use async_trait::async_trait;
use tracing::info;

/// A route table belonging to the network, with its main-association flag.
/// The main table goes away with the VPC and must never be targeted.
#[derive(Debug, Clone)]
pub struct RouteTable {
    pub id: String,
    pub is_main: bool,
}

/// Network-scoped operations the sequencer needs from the cloud API.
#[async_trait]
pub trait NetworkOps {
    async fn attached_gateways(&self, vpc_id: &str) -> Result<Vec<String>>;
    async fn detach_gateway(&self, gateway_id: &str, vpc_id: &str) -> Result<()>;
    async fn delete_gateway(&self, gateway_id: &str) -> Result<()>;

    async fn subnets(&self, vpc_id: &str) -> Result<Vec<String>>;
    async fn delete_subnet(&self, subnet_id: &str) -> Result<()>;

    async fn route_tables(&self, vpc_id: &str) -> Result<Vec<RouteTable>>;
    async fn delete_route_table(&self, route_table_id: &str) -> Result<()>;

    async fn network_interfaces(&self, vpc_id: &str) -> Result<Vec<String>>;
    async fn delete_network_interface(&self, interface_id: &str) -> Result<()>;

    async fn delete_network(&self, vpc_id: &str) -> Result<()>;
}

/// Empty the VPC in dependency order, then delete it.
pub async fn tear_down_network(ops: &dyn NetworkOps, vpc_id: &str) -> Result<()> {
    info!("Deleting resources in VPC: {}", vpc_id);

    for gateway_id in ops.attached_gateways(vpc_id).await? {
        info!("Detaching and deleting internet gateway: {}", gateway_id);
        ops.detach_gateway(&gateway_id, vpc_id).await?;
        ops.delete_gateway(&gateway_id).await?;
    }

    for subnet_id in ops.subnets(vpc_id).await? {
        info!("Deleting subnet: {}", subnet_id);
        ops.delete_subnet(&subnet_id).await?;
    }

    for table in ops.route_tables(vpc_id).await? {
        if table.is_main {
            continue;
        }
        info!("Deleting route table: {}", table.id);
        ops.delete_route_table(&table.id).await?;
    }

    for interface_id in ops.network_interfaces(vpc_id).await? {
        info!("Deleting network interface: {}", interface_id);
        ops.delete_network_interface(&interface_id).await?;
    }

    info!("Deleting VPC: {}", vpc_id);
    ops.delete_network(vpc_id).await
}
