use crate::projects::{OrderTable, ProjectRecord};
use std::cmp::Ordering;
use tracing::debug;

/// Merge curated and fetched projects into one display sequence.
///
/// Curated projects come first, then fetched ones. Fetched projects without
/// an explicit order pick one up from `order_table` by name. The result is
/// stable-sorted with [`compare_projects`], so equal keys keep their merged
/// relative position.
pub fn aggregate<I>(custom: &[ProjectRecord], fetched: I, order_table: &OrderTable) -> Vec<ProjectRecord>
where
    I: IntoIterator<Item = ProjectRecord>,
{
    let mut projects: Vec<ProjectRecord> = custom.to_vec();

    projects.extend(fetched.into_iter().map(|mut project| {
        if project.order.is_none() {
            project.order = order_table.order_for(&project.name);
        }
        project
    }));

    // slice::sort_by is stable
    projects.sort_by(compare_projects);

    debug!(
        "Aggregated {} projects ({} curated)",
        projects.len(),
        custom.len()
    );

    projects
}

/// Display ordering between two projects.
///
/// Ordered projects precede unordered ones and compare numerically.
/// Unordered projects compare by `updated_at`, newest first, with a missing
/// timestamp treated as the oldest.
pub fn compare_projects(a: &ProjectRecord, b: &ProjectRecord) -> Ordering {
    match (a.order, b.order) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        // Option orders None below Some, so reversing puts missing dates last
        (None, None) => b.updated_at.cmp(&a.updated_at),
    }
}
