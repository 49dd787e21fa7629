//! Partitioning schemes into equivalence classes by rule set.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use tracing::{debug, info};
use uni_core::entities::Scheme;
use uni_core::enums::{SchemeCategory, SchemeFilter};

use crate::catalog::SchemeCatalog;
use crate::error::DistillError;
use crate::key::RuleSetKey;
use crate::result::DistilledResult;
use crate::run::DistillationRun;

/// Group `schemes` by identical rule sets.
///
/// Classes of two or more become [`DistilledResult`]s; singletons land in the
/// undistillable list. Classes are visited in the order their first member
/// appears in the input, and members keep input order until the result sorts
/// them for display. The run's category is taken from the first scheme; empty
/// input yields an empty run.
///
/// # Errors
///
/// Returns `DistillError::Catalog` if reading a member's projects fails.
pub async fn distill<C: SchemeCatalog>(
    schemes: Vec<Scheme>,
    catalog: &C,
) -> Result<DistillationRun, DistillError> {
    let Some(category) = schemes.first().map(|s| s.category) else {
        debug!("No schemes to distill");
        return Ok(DistillationRun::default());
    };

    let total = schemes.len();
    let mut slots: HashMap<RuleSetKey, usize> = HashMap::new();
    let mut clusters: Vec<Vec<Scheme>> = Vec::new();
    for scheme in schemes {
        match slots.entry(RuleSetKey::from(&scheme)) {
            Entry::Occupied(slot) => clusters[*slot.get()].push(scheme),
            Entry::Vacant(slot) => {
                slot.insert(clusters.len());
                clusters.push(vec![scheme]);
            }
        }
    }

    let mut run = DistillationRun::new(category);
    for cluster in clusters {
        if cluster.len() < 2 {
            for scheme in cluster {
                run.add_undistillable(scheme);
            }
            continue;
        }
        debug!(size = cluster.len(), "Distilling cluster");
        run.add_distilled(DistilledResult::build(category, cluster, catalog).await?);
    }

    info!(
        %category,
        schemes = total,
        distilled = run.distilled().len(),
        undistillable = run.undistillable().len(),
        "Distillation complete"
    );
    Ok(run)
}

/// Schemes of `category` admitted by `filter`, rules loaded.
///
/// # Errors
///
/// Returns `DistillError::Catalog` if any catalog call fails.
pub async fn load_schemes<C: SchemeCatalog>(
    catalog: &C,
    category: SchemeCategory,
    filter: SchemeFilter,
) -> Result<Vec<Scheme>, DistillError> {
    let mut admitted = Vec::new();
    for mut scheme in catalog.list_schemes(category).await? {
        if filter != SchemeFilter::All {
            let projects = catalog.projects_for(&scheme).await?;
            if !filter.admits(projects.len()) {
                continue;
            }
        }
        scheme.rules = catalog.list_rules(&scheme).await?;
        admitted.push(scheme);
    }
    debug!(%category, %filter, count = admitted.len(), "Loaded schemes");
    Ok(admitted)
}
