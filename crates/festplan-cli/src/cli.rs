//! Command handlers.
//!
//! Every command opens a fresh session on the planner database, performs
//! its action, renders the result as markdown and then prints whatever
//! notifications the session raised.

use anyhow::{Context, Result};
use festplan_core::{
    display::{FestivalList, Lineup, PlanView},
    params::{LineupQuery, OpenFestival, SetSelection},
    plan_url::PLAN_PARAM,
    session::Location,
    Database, Planner, PlannerSession,
};
use log::debug;

use crate::{args::ImportArgs, renderer::TerminalRenderer};

type Session = PlannerSession<Database>;

pub struct Cli {
    planner: Planner,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(planner: Planner, renderer: TerminalRenderer) -> Self {
        Self { planner, renderer }
    }

    fn open(&self, params: &OpenFestival) -> Result<Session> {
        self.planner
            .open_session(&params.festival_id, params.plan.as_deref())
            .with_context(|| format!("Failed to open festival '{}'", params.festival_id))
    }

    /// Prints the session's notifications, oldest first. Undo actions are
    /// not offered since the session ends with the command.
    fn render_notifications(&self, session: &Session) -> Result<()> {
        let mut lines: Vec<String> = session
            .notifications()
            .map(|n| {
                let mut n = n.clone();
                n.action = None;
                n.to_string()
            })
            .collect();
        if lines.is_empty() {
            return Ok(());
        }
        lines.reverse();
        self.renderer.render(&format!("\n{}\n", lines.join("\n")))
    }

    pub fn list_festivals(&self) -> Result<()> {
        let festivals = FestivalList(self.planner.festivals());
        self.renderer.render(&festivals.to_string())
    }

    pub fn show_lineup(&self, open: &OpenFestival, query: &LineupQuery) -> Result<()> {
        let mut session = self.open(open)?;
        session
            .apply_query(query)
            .context("Invalid lineup filters")?;
        self.renderer.render(&Lineup::new(&session).to_string())?;
        self.render_notifications(&session)
    }

    pub fn list_genres(&self, open: &OpenFestival) -> Result<()> {
        let festival = self
            .planner
            .festival(&open.festival_id)
            .with_context(|| format!("Failed to open festival '{}'", open.festival_id))?;
        let genres = festplan_core::filtering::collect_genres(&festival.sets);

        let mut output = format!("# Genres at {}\n\n", festival.name);
        if genres.is_empty() {
            output.push_str("No genres listed.\n");
        }
        for genre in genres {
            output.push_str(&format!("- {genre}\n"));
        }
        self.renderer.render(&output)
    }

    pub fn show_plan(&self, open: &OpenFestival) -> Result<()> {
        let session = self.open(open)?;
        self.renderer.render(&PlanView::new(&session).to_string())?;
        self.render_notifications(&session)
    }

    pub fn toggle(&self, selection: SetSelection) -> Result<()> {
        let mut session = self.open(&OpenFestival {
            festival_id: selection.festival_id,
            plan: None,
        })?;
        let mut output = String::new();
        for set_id in &selection.set_ids {
            let Some(set) = session.festival().set(set_id) else {
                output.push_str(&format!("Unknown set `{set_id}`, skipped.\n"));
                continue;
            };
            let band_name = set.band_name.clone();
            session.toggle_planned(set_id);
            if session.store().is_planned(set_id) {
                output.push_str(&format!("Added **{band_name}** to your plan.\n"));
            }
            debug!("Toggled '{set_id}'");
        }
        if !output.is_empty() {
            output.push('\n');
        }
        output.push_str(&PlanView::new(&session).to_string());
        self.renderer.render(&output)?;
        self.render_notifications(&session)
    }

    pub fn favorite(&self, selection: SetSelection) -> Result<()> {
        let mut session = self.open(&OpenFestival {
            festival_id: selection.festival_id,
            plan: None,
        })?;
        let mut output = String::new();
        for set_id in &selection.set_ids {
            let Some(set) = session.festival().set(set_id) else {
                output.push_str(&format!("Unknown set `{set_id}`, skipped.\n"));
                continue;
            };
            let band_name = set.band_name.clone();
            session.toggle_favorite(set_id);
            if session.store().is_favorite(set_id) {
                output.push_str(&format!("★ **{band_name}** is a favorite.\n"));
            } else {
                output.push_str(&format!("**{band_name}** is no longer a favorite.\n"));
            }
        }
        self.renderer.render(&output)?;
        self.render_notifications(&session)
    }

    pub fn clear(&self, open: &OpenFestival) -> Result<()> {
        let mut session = self.open(open)?;
        if session.clear_plan().is_none() {
            self.renderer.render("Your plan is already empty.\n")?;
        }
        self.render_notifications(&session)
    }

    pub fn import(&self, args: ImportArgs) -> Result<()> {
        let plan = plan_value(&args.link);
        let session = self.open(&OpenFestival {
            festival_id: args.festival,
            plan: Some(plan),
        })?;
        if session.imported_sets() == 0 {
            self.renderer
                .render("The link did not contain any sets of this festival.\n\n")?;
        }
        self.renderer.render(&PlanView::new(&session).to_string())?;
        self.render_notifications(&session)
    }

    pub fn share(&self, open: &OpenFestival) -> Result<()> {
        let session = self.open(open)?;
        if session.store().planned_ids().is_empty() {
            self.renderer
                .render("Your plan is empty; the link opens the festival page.\n")?;
        }
        println!("{}", session.share_url());
        Ok(())
    }
}

/// Accepts a whole share link or just its `plan` value.
fn plan_value(link: &str) -> String {
    match Location::parse(link) {
        Ok(location) => location.param(PLAN_PARAM).unwrap_or_default(),
        Err(_) => link.to_string(),
    }
}
