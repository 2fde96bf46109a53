use crate::content::Project;

pub const ALL: &str = "All";

/// Categories offered by the filter bar: `All` first, then each category once in order of
/// first appearance.
pub fn categories(projects: &[Project]) -> Vec<&'static str> {
    let mut out = vec![ALL];
    for p in projects {
        if !out.contains(&p.category) {
            out.push(p.category);
        }
    }
    out
}

/// Projects matching `category` exactly; [`ALL`] matches everything.
pub fn filter<'a>(projects: &'a [Project], category: &str) -> Vec<&'a Project> {
    projects
        .iter()
        .filter(|p| category == ALL || p.category == category)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::PROJECTS;

    #[test]
    fn test_categories_unique_and_ordered() {
        assert_eq!(categories(PROJECTS), vec![ALL, "Web", "Systems", "Tools"]);
    }

    #[test]
    fn test_all_shows_everything() {
        assert_eq!(filter(PROJECTS, ALL).len(), PROJECTS.len());
    }

    #[test]
    fn test_exact_match_only() {
        let web = filter(PROJECTS, "Web");
        assert_eq!(web.len(), 2);
        assert!(web.iter().all(|p| p.category == "Web"));

        assert!(filter(PROJECTS, "web").is_empty());
        assert!(filter(PROJECTS, "Unknown").is_empty());
    }
}
