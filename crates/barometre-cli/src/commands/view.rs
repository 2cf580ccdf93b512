//! View and stats command implementation.

use crate::cli::{ViewArgs, ViewKind};
use crate::error::Result;
use crate::output::Formatter;
use crate::session::Session;
use barometre_domain::views::{
    build_all_pairs_view, build_cross_views, build_stats, build_unidirectional_view, ProjectViews,
};

/// Execute the view command.
pub fn execute_view(args: ViewArgs, session: &Session, formatter: &Formatter) -> Result<()> {
    let output = render_view(args.kind, session, formatter)?;
    println!("{}", output);
    Ok(())
}

/// Execute the stats command.
pub fn execute_stats(session: &Session, formatter: &Formatter) -> Result<()> {
    println!("{}", formatter.stats(&build_stats(&session.project))?);
    Ok(())
}

fn render_view(kind: ViewKind, session: &Session, formatter: &Formatter) -> Result<String> {
    let project = &session.project;
    match kind {
        ViewKind::Relations => formatter.all_pairs(&build_all_pairs_view(project)),
        ViewKind::Unidirectional => formatter.relations(&build_unidirectional_view(project)),
        ViewKind::NegativeCross => formatter.cross(&build_cross_views(project).negative),
        ViewKind::PositiveCross => formatter.cross(&build_cross_views(project).positive),
        ViewKind::Recap => {
            let views = ProjectViews::build(project);
            formatter.recap(&views.recap)
        }
    }
}
