//! Turns per-family window titles into a single presence status.

use crate::classifier::{extract_project_title, is_start_page_title};
use crate::constants::label;
use crate::models::{Channel, PresenceDescriptor};

/// Window titles of every running instance of one family, in process order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FamilySnapshot {
    pub channel: Channel,
    pub titles: Vec<String>,
}

impl FamilySnapshot {
    pub fn new(channel: Channel, titles: Vec<String>) -> Self {
        Self { channel, titles }
    }

    pub fn empty(channel: Channel) -> Self {
        Self::new(channel, Vec::new())
    }

    pub fn process_count(&self) -> usize {
        self.titles.len()
    }

    fn shows_start_page(&self) -> bool {
        self.titles.iter().any(|title| is_start_page_title(title))
    }

    /// Project names of instances that are not on the start page.
    fn project_titles(&self) -> Vec<String> {
        self.titles
            .iter()
            .filter(|title| !is_start_page_title(title))
            .map(|title| extract_project_title(title))
            .filter(|project| !project.is_empty())
            .collect()
    }
}

/// Inputs of one synthesis pass besides the snapshots.
#[derive(Debug, Clone, Copy)]
pub struct SynthesisOptions {
    pub include_titles: bool,
    pub runner_running: bool,
    pub started_at: i64,
}

pub fn synthesize(
    modern: &FamilySnapshot,
    legacy: &FamilySnapshot,
    options: SynthesisOptions,
) -> PresenceDescriptor {
    let modern_projects = modern.project_titles();
    let legacy_projects = legacy.project_titles();

    // First-seen order, modern family first
    let mut unique: Vec<&str> = Vec::new();
    for project in modern_projects.iter().chain(&legacy_projects) {
        if !unique.contains(&project.as_str()) {
            unique.push(project);
        }
    }

    let working_state = || {
        if options.runner_running {
            label::RUNNING_APPLICATION.to_string()
        } else {
            label::MAIN_WORKSPACE.to_string()
        }
    };
    let by_projects = || Channel::dominant(modern_projects.len(), legacy_projects.len());

    let (details, state, channel) = match unique.as_slice() {
        [] => {
            let details = if modern.shows_start_page() || legacy.shows_start_page() {
                label::START_PAGE.to_string()
            } else {
                String::new()
            };
            let channel = Channel::dominant(modern.process_count(), legacy.process_count());
            (details, String::new(), channel)
        }
        [project] => {
            let details = if options.include_titles {
                format!("{}: \"{project}\"", label::PROJECT_OPEN)
            } else {
                format!("{}{}", label::PROJECT_OPEN, label::PROJECT_TITLE_HIDDEN)
            };
            (details, working_state(), by_projects())
        }
        projects => {
            if options.include_titles {
                let details = format!("{}{}:", label::PROJECT_OPEN, label::MULTIPLE_PROJECTS);
                let state = projects
                    .iter()
                    .map(|project| format!("\"{project}\""))
                    .collect::<Vec<_>>()
                    .join(", ");
                (details, state, by_projects())
            } else {
                let details = format!(
                    "{} {}{}",
                    label::PROJECT_OPEN,
                    projects.len(),
                    label::MULTIPLE_PROJECTS
                );
                (details, working_state(), by_projects())
            }
        }
    };

    PresenceDescriptor::new(details, state, options.started_at, channel)
}

#[cfg(test)]
mod tests {
    use super::*;

    const STARTED: i64 = 1_700_000_000;

    fn modern(titles: &[&str]) -> FamilySnapshot {
        FamilySnapshot::new(Channel::Modern, titles.iter().map(|t| t.to_string()).collect())
    }

    fn legacy(titles: &[&str]) -> FamilySnapshot {
        FamilySnapshot::new(Channel::Legacy, titles.iter().map(|t| t.to_string()).collect())
    }

    fn options(include_titles: bool, runner_running: bool) -> SynthesisOptions {
        SynthesisOptions {
            include_titles,
            runner_running,
            started_at: STARTED,
        }
    }

    #[test]
    fn test_single_project_with_title() {
        let presence = synthesize(
            &modern(&["Alpha - GameMaker"]),
            &legacy(&[]),
            options(true, false),
        );
        assert_eq!(presence.details, "Working on: \"Alpha\"");
        assert_eq!(presence.state, "In main workspace");
        assert_eq!(presence.channel, Channel::Modern);
        assert_eq!(presence.started_at, STARTED);
    }

    #[test]
    fn test_single_project_title_hidden() {
        let presence = synthesize(
            &modern(&["Alpha - GameMaker"]),
            &legacy(&[]),
            options(false, true),
        );
        assert_eq!(presence.details, "Working on a project");
        assert!(!presence.details.contains("Alpha"));
        assert_eq!(presence.state, "Running the application");
    }

    #[test]
    fn test_start_page_only() {
        let presence = synthesize(
            &modern(&["Start Page - GameMaker"]),
            &legacy(&[]),
            options(true, false),
        );
        assert_eq!(presence.details, "On the Start Page");
        assert_eq!(presence.state, "");
        assert_eq!(presence.channel, Channel::Modern);
    }

    #[test]
    fn test_no_projects_no_start_page() {
        let presence = synthesize(&modern(&[""]), &legacy(&["", ""]), options(true, false));
        assert_eq!(presence.details, "");
        assert_eq!(presence.state, "");
        // Raw process count decides when nothing is open
        assert_eq!(presence.channel, Channel::Legacy);
    }

    #[test]
    fn test_multiple_projects_with_titles() {
        let presence = synthesize(
            &modern(&["Alpha - GameMaker"]),
            &legacy(&["Beta.project.gmx  -  GameMaker: Studio"]),
            options(true, false),
        );
        assert_eq!(presence.details, "Working on projects:");
        assert_eq!(presence.state, "\"Alpha\", \"Beta\"");
        assert_eq!(presence.channel, Channel::Modern);
    }

    #[test]
    fn test_multiple_projects_titles_hidden() {
        let modern_family = modern(&["Alpha - GameMaker"]);
        let legacy_family = legacy(&["Beta.project.gmx  -  GameMaker: Studio"]);

        let presence = synthesize(&modern_family, &legacy_family, options(false, false));
        assert_eq!(presence.details, "Working on 2 projects");
        assert!(!presence.details.contains("Alpha"));
        assert!(!presence.details.contains("Beta"));
        assert_eq!(presence.state, "In main workspace");

        let presence = synthesize(&modern_family, &legacy_family, options(false, true));
        assert_eq!(presence.state, "Running the application");
    }

    #[test]
    fn test_duplicate_titles_collapse() {
        let presence = synthesize(
            &modern(&["Alpha - GameMaker", "Alpha - GameMaker"]),
            &legacy(&[]),
            options(true, false),
        );
        assert_eq!(presence.details, "Working on: \"Alpha\"");
    }

    #[test]
    fn test_filtered_count_picks_dominant() {
        // Legacy has more project windows even though modern has more processes
        let presence = synthesize(
            &modern(&["Alpha - GameMaker", "Start Page - GameMaker", ""]),
            &legacy(&[
                "Beta.project.gmx  -  GameMaker: Studio",
                "Gamma.project.gmx  -  GameMaker: Studio",
            ]),
            options(true, false),
        );
        assert_eq!(presence.channel, Channel::Legacy);
        assert_eq!(presence.state, "\"Alpha\", \"Beta\", \"Gamma\"");
    }

    #[test]
    fn test_filtered_count_tie_favors_modern() {
        let presence = synthesize(
            &modern(&["Alpha - GameMaker"]),
            &legacy(&["Beta.project.gmx  -  GameMaker: Studio"]),
            options(false, false),
        );
        assert_eq!(presence.channel, Channel::Modern);
    }

    #[test]
    fn test_start_page_alongside_project_is_ignored() {
        let presence = synthesize(
            &modern(&["Start Page - GameMaker", "Alpha - GameMaker"]),
            &legacy(&[]),
            options(true, false),
        );
        assert_eq!(presence.details, "Working on: \"Alpha\"");
    }
}
