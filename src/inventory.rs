use std::fmt;

use aws_sdk_ec2::types::{Instance, InstanceStateName};
use regex::Regex;

use crate::aws::client::NAME_TAG_KEY;
use crate::aws::ec2::instance::get_tag_value;
use crate::{AllyError, Result};

/// Extra padding after the `id (name)` cell so the address columns stay
/// separated even for the longest name in the batch.
const ID_CELL_PADDING: usize = 15;

/// Width of each address column in the rendered table.
const ADDR_CELL_WIDTH: usize = 20;

/// A display-ready instance derived from one raw EC2 record.
///
/// `name_column_width` is shared across every instance of one normalized
/// batch and only affects rendering alignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedInstance {
    pub id: String,
    pub display_name: String,
    pub private_address: String,
    pub public_address: String,
    pub key_name: String,
    pub name_column_width: usize,
}

impl fmt::Display for ResolvedInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let id_cell = format!("{} ({})", self.id, self.display_name);
        write!(
            f,
            "{:<id_width$}{:<addr_width$}{:<addr_width$}{}",
            id_cell,
            self.private_address,
            self.public_address,
            self.key_name,
            id_width = self.name_column_width + ID_CELL_PADDING,
            addr_width = ADDR_CELL_WIDTH,
        )
    }
}

/// Convert raw DescribeInstances records into display-ready instances.
///
/// The provider query already filters to running instances server-side;
/// the normalizer re-checks when `only_running` is set so it behaves the
/// same on any input. The shared name column width is computed from the
/// records that survive the filter.
pub fn normalize(records: &[Instance], only_running: bool) -> Vec<ResolvedInstance> {
    let records: Vec<&Instance> = records
        .iter()
        .filter(|r| !only_running || is_running(r))
        .collect();

    let width = records
        .iter()
        .map(|r| display_name(r).len())
        .max()
        .unwrap_or(0);

    records
        .into_iter()
        .map(|r| ResolvedInstance {
            id: r.instance_id().unwrap_or_default().to_string(),
            display_name: display_name(r),
            private_address: r.private_ip_address().unwrap_or_default().to_string(),
            public_address: r.public_ip_address().unwrap_or_default().to_string(),
            key_name: r.key_name().unwrap_or_default().to_string(),
            name_column_width: width,
        })
        .collect()
}

/// Keep the instances whose name matches `pattern`, sorted by name.
///
/// The pattern is an unanchored regular expression search; an empty
/// pattern matches everything. Equal names keep their input order.
pub fn filter_and_sort(
    mut instances: Vec<ResolvedInstance>,
    pattern: &str,
) -> Result<Vec<ResolvedInstance>> {
    let re = Regex::new(pattern).map_err(|e| AllyError::InvalidPattern(e.to_string()))?;

    instances.retain(|i| re.is_match(&i.display_name));
    instances.sort_by(|a, b| a.display_name.cmp(&b.display_name));

    Ok(instances)
}

fn is_running(record: &Instance) -> bool {
    record
        .state()
        .and_then(|s| s.name())
        .map(|name| *name == InstanceStateName::Running)
        .unwrap_or(false)
}

/// Name shown for a record: the value of its `Name` tag, empty if absent.
/// A duplicated `Name` tag resolves to the first occurrence.
fn display_name(record: &Instance) -> String {
    get_tag_value(record, NAME_TAG_KEY).unwrap_or_default()
}
