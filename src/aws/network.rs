//! VPC-scoped EC2 operations
//!
//! Implements the teardown sequencer's [`NetworkOps`] boundary: every
//! listing is a `describe_*` call filtered by the VPC's id (gateways use
//! the `attachment.vpc-id` filter, everything else plain `vpc-id`).

use anyhow::{Context, Result};
use async_trait::async_trait;
use aws_sdk_ec2::types::Filter;

use super::clients::AwsClients;
use crate::resource::teardown::{NetworkOps, RouteTable};

fn vpc_filter(name: &str, vpc_id: &str) -> Filter {
    Filter::builder().name(name).values(vpc_id).build()
}

#[async_trait]
impl NetworkOps for AwsClients {
    async fn attached_gateways(&self, vpc_id: &str) -> Result<Vec<String>> {
        let out = self
            .ec2
            .describe_internet_gateways()
            .filters(vpc_filter("attachment.vpc-id", vpc_id))
            .send()
            .await
            .context("listing internet gateways")?;

        Ok(out
            .internet_gateways()
            .iter()
            .filter_map(|igw| igw.internet_gateway_id())
            .map(str::to_string)
            .collect())
    }

    async fn detach_gateway(&self, gateway_id: &str, vpc_id: &str) -> Result<()> {
        self.ec2
            .detach_internet_gateway()
            .internet_gateway_id(gateway_id)
            .vpc_id(vpc_id)
            .send()
            .await
            .context("detaching internet gateway")?;
        Ok(())
    }

    async fn delete_gateway(&self, gateway_id: &str) -> Result<()> {
        self.ec2
            .delete_internet_gateway()
            .internet_gateway_id(gateway_id)
            .send()
            .await
            .context("deleting internet gateway")?;
        Ok(())
    }

    async fn subnets(&self, vpc_id: &str) -> Result<Vec<String>> {
        let out = self
            .ec2
            .describe_subnets()
            .filters(vpc_filter("vpc-id", vpc_id))
            .send()
            .await
            .context("listing subnets")?;

        Ok(out
            .subnets()
            .iter()
            .filter_map(|subnet| subnet.subnet_id())
            .map(str::to_string)
            .collect())
    }

    async fn delete_subnet(&self, subnet_id: &str) -> Result<()> {
        self.ec2
            .delete_subnet()
            .subnet_id(subnet_id)
            .send()
            .await
            .context("deleting subnet")?;
        Ok(())
    }

    async fn route_tables(&self, vpc_id: &str) -> Result<Vec<RouteTable>> {
        let out = self
            .ec2
            .describe_route_tables()
            .filters(vpc_filter("vpc-id", vpc_id))
            .send()
            .await
            .context("listing route tables")?;

        Ok(out
            .route_tables()
            .iter()
            .filter_map(|table| {
                let id = table.route_table_id()?;
                let is_main = table
                    .associations()
                    .iter()
                    .any(|assoc| assoc.main().unwrap_or(false));
                Some(RouteTable {
                    id: id.to_string(),
                    is_main,
                })
            })
            .collect())
    }

    async fn delete_route_table(&self, route_table_id: &str) -> Result<()> {
        self.ec2
            .delete_route_table()
            .route_table_id(route_table_id)
            .send()
            .await
            .context("deleting route table")?;
        Ok(())
    }

    async fn network_interfaces(&self, vpc_id: &str) -> Result<Vec<String>> {
        let out = self
            .ec2
            .describe_network_interfaces()
            .filters(vpc_filter("vpc-id", vpc_id))
            .send()
            .await
            .context("listing network interfaces")?;

        Ok(out
            .network_interfaces()
            .iter()
            .filter_map(|eni| eni.network_interface_id())
            .map(str::to_string)
            .collect())
    }

    async fn delete_network_interface(&self, interface_id: &str) -> Result<()> {
        self.ec2
            .delete_network_interface()
            .network_interface_id(interface_id)
            .send()
            .await
            .context("deleting network interface")?;
        Ok(())
    }

    async fn delete_network(&self, vpc_id: &str) -> Result<()> {
        self.ec2
            .delete_vpc()
            .vpc_id(vpc_id)
            .send()
            .await
            .context("deleting VPC")?;
        Ok(())
    }
}
