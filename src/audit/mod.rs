// Johnson compliance audit
//
// Scores an experiment against the ten principles of Johnson (2002),
// "A Theoretician's Guide to the Experimental Analysis of Algorithms".
// Scoring is deliberately coarse (0 / 50 / 100 per principle): the audit
// exists to surface what is missing, not to rank papers.

mod latex;
mod principles;

pub use latex::{compliance_table, write_table, LITERATURE_SCORES};
pub use principles::{
    run_audit, Assessment, AuditContext, AuditReport, PrincipleScore, AUDIT_JSON_NAME,
    ENFORCEMENT_CSV_NAME, HTML_REPORT_NAME, MACHINE_SPECS_NAME, NORMALIZED_CSV_NAME,
};
