//! Reply rendering.
//!
//! Everything here is pure: the same report and settings always render the
//! same markdown.

use crate::config::BotSettings;

use super::report::{AggregatedReport, Notice};

pub const BARREL_ROLL_IMAGE: &str =
    "![barrel-roll](https://i.chzbgr.com/maxW500/5816682496/h83DFAE3F/)";

/// The command overview, sent when a comment addressed the bot but nothing
/// produced output.
pub fn help_text(settings: &BotSettings) -> String {
    format!(
        "Here is what I can do for you:\n\
         \n\
         * `help` - shows this help\n\
         * `create-repo {{name}}` - creates a {org} repo\n\
         * `add-user {{username}}` - adds a user to the `{slug}` team and the org\n\
         * `create-team {{team}}` - creates a new team\n\
         * `add-team-user {{team}} {{username...}}` - adds users to a specific team\n\
         * `version` - shows which version of me is running\n",
        org = settings.org,
        slug = settings.organizers_team_slug,
    )
}

pub fn rejection_message(sender: &str, settings: &BotSettings) -> String {
    format!(
        "Sorry @{}. You are not allowed to do that if you are not a member of the `{}` team",
        sender, settings.organizers_team_slug
    )
}

pub fn error_message(detail: &str) -> String {
    format!("I have encountered an error doing this :(\n\n```\n{}\n```\n", detail)
}

fn notice_message(notice: &Notice) -> String {
    match notice {
        Notice::TeamNotFound { team } => format!("I cannot find the team `{}`.", team),
        Notice::Version { version } => format!("I am running version {}.", version),
    }
}

/// One part of the summary sentence.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Clause<'a> {
    CreatedRepos(&'a [String]),
    AddedUsers(&'a [String]),
    CreatedTeams(&'a [String]),
    Invited { team: &'a str, users: &'a [String] },
}

impl Clause<'_> {
    fn render(&self, settings: &BotSettings) -> String {
        let org = &settings.org;
        match *self {
            Clause::CreatedRepos([single]) => format!(
                "I have created a new repo called {}",
                repo_link(org, single)
            ),
            Clause::CreatedRepos(repos) => format!(
                "I have created {} new repos called {}",
                repos.len(),
                join(repos.iter().map(|r| repo_link(org, r)))
            ),
            Clause::AddedUsers(users) => format!(
                "I have added {} to the `{}` team",
                mentions(users),
                settings.organizers_team_slug
            ),
            Clause::CreatedTeams(teams) => format!(
                "I have created the {} team{}",
                join(teams.iter().map(|t| format!("@{}/{}", org, t))),
                if teams.len() == 1 { "" } else { "s" }
            ),
            Clause::Invited { team, users } => {
                format!("I have invited {} to the `{}` team", mentions(users), team)
            }
        }
    }
}

fn repo_link(org: &str, repo: &str) -> String {
    format!("[{repo}](https://github.com/{org}/{repo})")
}

fn mentions(users: &[String]) -> String {
    join(users.iter().map(|u| format!("@{}", u)))
}

fn join(items: impl Iterator<Item = String>) -> String {
    items.collect::<Vec<_>>().join(", ")
}

fn clauses(report: &AggregatedReport) -> Vec<Clause<'_>> {
    let mut clauses = Vec::new();
    if !report.repos.is_empty() {
        clauses.push(Clause::CreatedRepos(&report.repos));
    }
    if !report.added_users.is_empty() {
        clauses.push(Clause::AddedUsers(&report.added_users));
    }
    if !report.new_teams.is_empty() {
        clauses.push(Clause::CreatedTeams(&report.new_teams));
    }
    clauses.extend(report.team_invites.iter().map(|invite| Clause::Invited {
        team: &invite.team,
        users: &invite.users,
    }));
    clauses
}

/// Renders the summary sentence, or `None` if nothing was changed.
pub fn summary(report: &AggregatedReport, settings: &BotSettings) -> Option<String> {
    let clauses = clauses(report);
    if clauses.is_empty() {
        return None;
    }
    let rendered: Vec<String> = clauses.iter().map(|c| c.render(settings)).collect();
    Some(format!("{}.", rendered.join(" and ")))
}

/// Renders the single reply for a report.
///
/// A barrel roll replaces everything else. Otherwise notices come first,
/// one paragraph each, then the summary. With nothing to say the reply is
/// the help text.
pub fn render_reply(report: &AggregatedReport, settings: &BotSettings) -> String {
    if report.barrel_roll {
        return BARREL_ROLL_IMAGE.to_string();
    }

    let paragraphs: Vec<String> = report
        .notices
        .iter()
        .map(notice_message)
        .chain(summary(report, settings))
        .collect();

    if paragraphs.is_empty() {
        help_text(settings)
    } else {
        paragraphs.join("\n\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relay::report::TeamInvite;
    use crate::test_utils::{arb_name, test_settings};
    use proptest::prelude::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn single_repo_is_singular() {
        let report = AggregatedReport {
            repos: strings(&["nyc"]),
            ..Default::default()
        };

        assert_eq!(
            render_reply(&report, &test_settings()),
            "I have created a new repo called [nyc](https://github.com/nodeschool/nyc)."
        );
    }

    #[test]
    fn several_repos_are_counted() {
        let report = AggregatedReport {
            repos: strings(&["nyc", "oslo"]),
            ..Default::default()
        };

        assert_eq!(
            render_reply(&report, &test_settings()),
            "I have created 2 new repos called [nyc](https://github.com/nodeschool/nyc), \
             [oslo](https://github.com/nodeschool/oslo)."
        );
    }

    #[test]
    fn added_users_name_organizer_team() {
        let report = AggregatedReport {
            added_users: strings(&["jane"]),
            ..Default::default()
        };

        assert_eq!(
            render_reply(&report, &test_settings()),
            "I have added @jane to the `chapter-organizers` team."
        );
    }

    #[test]
    fn teams_singular_and_plural() {
        let settings = test_settings();
        let one = AggregatedReport {
            new_teams: strings(&["berlin"]),
            ..Default::default()
        };
        let two = AggregatedReport {
            new_teams: strings(&["berlin", "paris"]),
            ..Default::default()
        };

        assert_eq!(
            render_reply(&one, &settings),
            "I have created the @nodeschool/berlin team."
        );
        assert_eq!(
            render_reply(&two, &settings),
            "I have created the @nodeschool/berlin, @nodeschool/paris teams."
        );
    }

    #[test]
    fn clauses_are_joined_with_and() {
        let report = AggregatedReport {
            repos: strings(&["nyc"]),
            added_users: strings(&["a", "b"]),
            team_invites: vec![TeamInvite {
                team: "berlin".into(),
                users: strings(&["c"]),
            }],
            ..Default::default()
        };

        assert_eq!(
            render_reply(&report, &test_settings()),
            "I have created a new repo called [nyc](https://github.com/nodeschool/nyc) \
             and I have added @a, @b to the `chapter-organizers` team \
             and I have invited @c to the `berlin` team."
        );
    }

    #[test]
    fn notices_come_before_summary() {
        let report = AggregatedReport {
            repos: strings(&["nyc"]),
            notices: vec![
                Notice::Version {
                    version: "1.4.0".into(),
                },
                Notice::TeamNotFound {
                    team: "atlantis".into(),
                },
            ],
            ..Default::default()
        };

        assert_eq!(
            render_reply(&report, &test_settings()),
            "I am running version 1.4.0.\n\n\
             I cannot find the team `atlantis`.\n\n\
             I have created a new repo called [nyc](https://github.com/nodeschool/nyc)."
        );
    }

    #[test]
    fn barrel_roll_replaces_everything() {
        let report = AggregatedReport {
            repos: strings(&["nyc"]),
            barrel_roll: true,
            ..Default::default()
        };

        assert_eq!(render_reply(&report, &test_settings()), BARREL_ROLL_IMAGE);
    }

    #[test]
    fn empty_report_renders_help() {
        let settings = test_settings();
        let reply = render_reply(&AggregatedReport::default(), &settings);

        assert_eq!(reply, help_text(&settings));
        assert!(reply.starts_with("Here is what I can do for you:\n\n* `help` - shows this help\n"));
        assert!(reply.contains("* `create-repo {name}` - creates a nodeschool repo\n"));
        assert!(reply.contains("`chapter-organizers` team and the org"));
        assert!(reply.contains("* `version`"));
    }

    #[test]
    fn fixed_templates() {
        let settings = test_settings();
        assert_eq!(
            rejection_message("mallory", &settings),
            "Sorry @mallory. You are not allowed to do that if you are not a member of the \
             `chapter-organizers` team"
        );
        assert_eq!(
            error_message("Bad status: 422 (Validation Failed)"),
            "I have encountered an error doing this :(\n\n```\nBad status: 422 (Validation Failed)\n```\n"
        );
    }

    proptest! {
        #[test]
        fn every_invited_user_is_mentioned(
            team in arb_name(),
            users in prop::collection::vec(arb_name(), 1..10)
        ) {
            let report = AggregatedReport {
                team_invites: vec![TeamInvite { team: team.clone(), users: users.clone() }],
                ..Default::default()
            };
            let reply = render_reply(&report, &test_settings());

            let team_fragment = format!("`{}` team", team);
            prop_assert!(reply.contains(&team_fragment));
            for user in &users {
                let mention = format!("@{}", user);
                prop_assert!(reply.contains(&mention));
            }
        }

        #[test]
        fn summary_exists_iff_something_changed(
            repos in prop::collection::vec(arb_name(), 0..3),
            users in prop::collection::vec(arb_name(), 0..3),
        ) {
            let report = AggregatedReport {
                repos: repos.clone(),
                added_users: users.clone(),
                ..Default::default()
            };
            let summary = summary(&report, &test_settings());
            prop_assert_eq!(summary.is_some(), !repos.is_empty() || !users.is_empty());
        }
    }
}
