//! Plain-text draft summary printed by the runner.

use std::fmt::Write;

use chargen_domain::{
    calculate_free_points, default_stats, derive_completion, ApplicationPhase, Draft, Stage,
};
use chargen_shared::StartingAreaData;

pub fn application_label(phase: ApplicationPhase) -> &'static str {
    match phase.status() {
        Some(status) => status.label(),
        None => "Not submitted",
    }
}

/// Unspent attribute points; a draft without stats starts at the defaults.
pub fn free_points(draft: &Draft) -> i32 {
    match &draft.draft_data.attributes.stats {
        Some(stats) => calculate_free_points(stats),
        None => calculate_free_points(&default_stats()),
    }
}

/// `area` is the catalog entry for the draft's selected starting area, if known.
pub fn render_report(
    draft: &Draft,
    phase: ApplicationPhase,
    area: Option<&StartingAreaData>,
) -> String {
    let completion = derive_completion(draft);
    let mut out = String::new();

    let _ = writeln!(out, "Draft {} (stage: {})", draft.id, draft.current_stage);
    let _ = writeln!(out, "Application: {}", application_label(phase));
    if let Some(area) = area {
        let _ = writeln!(out, "Origin: {} (theme: {})", area.name, area.theme());
    }
    for stage in Stage::all() {
        let mark = if completion.get(stage).copied().unwrap_or(false) {
            'x'
        } else {
            ' '
        };
        let _ = writeln!(
            out,
            " [{mark}] {:>2}. {}",
            stage.ordinal(),
            stage.display_name()
        );
    }
    let _ = writeln!(out, "Free Points: {}", free_points(draft));

    let actions = phase.actions();
    let available: Vec<&str> = [
        ("submit", actions.submit),
        ("unsubmit", actions.unsubmit),
        ("withdraw", actions.withdraw),
        ("resubmit", actions.resubmit),
        ("edit", actions.edit_draft),
        ("comment", actions.comment),
    ]
    .into_iter()
    .filter_map(|(name, enabled)| enabled.then_some(name))
    .collect();
    let _ = writeln!(
        out,
        "Available actions: {}",
        if available.is_empty() {
            "none".to_string()
        } else {
            available.join(", ")
        }
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chargen_domain::{ApplicationStatus, AreaId, DraftId};
    use serde_json::json;

    fn draft_with_stats(stats: serde_json::Value) -> Draft {
        serde_json::from_value(json!({"id": 3, "draft_data": {"stats": stats}})).unwrap()
    }

    fn eight_stats(raised: &[(&str, i32)]) -> serde_json::Value {
        let mut stats = json!({
            "strength": 20, "agility": 20, "stamina": 20, "charm": 20,
            "presence": 20, "intellect": 20, "wits": 20, "willpower": 20
        });
        for (stat, value) in raised {
            stats[*stat] = json!(value);
        }
        stats
    }

    fn rendered_points(draft: &Draft) -> String {
        render_report(draft, ApplicationPhase::NoApplication, None)
            .lines()
            .find(|line| line.starts_with("Free Points:"))
            .unwrap()
            .to_string()
    }

    #[test]
    fn free_points_line_for_default_allocation() {
        assert_eq!(rendered_points(&draft_with_stats(eight_stats(&[]))), "Free Points: 5");
    }

    #[test]
    fn free_points_line_when_budget_is_spent() {
        let stats = eight_stats(&[
            ("strength", 30),
            ("agility", 30),
            ("stamina", 30),
            ("wits", 30),
            ("willpower", 30),
        ]);
        assert_eq!(rendered_points(&draft_with_stats(stats)), "Free Points: 0");
    }

    #[test]
    fn free_points_line_goes_negative() {
        let stats = eight_stats(&[("strength", 50), ("agility", 50), ("stamina", 40)]);
        assert_eq!(rendered_points(&draft_with_stats(stats)), "Free Points: -3");
    }

    #[test]
    fn origin_line_shows_area_theme() {
        let area: StartingAreaData =
            serde_json::from_value(json!({"id": 1, "name": "Arx", "realm_name": "Arx"})).unwrap();
        let report = render_report(
            &Draft::new(DraftId::new(3)),
            ApplicationPhase::NoApplication,
            Some(&area),
        );
        assert!(report.contains("Origin: Arx (theme: arx)"));
    }

    #[test]
    fn fresh_draft_report() {
        let mut draft = Draft::new(DraftId::new(3));
        draft.selected_area = Some(AreaId::new(1));

        let report = render_report(&draft, ApplicationPhase::NoApplication, None);
        assert!(report.starts_with("Draft 3 (stage: Origin)\n"));
        assert!(report.contains("Application: Not submitted"));
        assert!(report.contains(" [x]  1. Origin"));
        assert!(report.contains(" [ ]  2. Heritage"));
        assert!(report.contains("Free Points: 5"));
        assert!(report.contains("Available actions: submit, edit"));
    }

    #[test]
    fn closed_application_has_no_actions() {
        let draft = Draft::new(DraftId::new(3));
        let phase = ApplicationPhase::from_status(Some(ApplicationStatus::Denied));
        let report = render_report(&draft, phase, None);
        assert!(report.contains("Application: Denied"));
        assert!(report.contains("Available actions: none"));
    }
}
