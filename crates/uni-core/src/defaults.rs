//! Built-in rule type catalogs.
//!
//! `uni init` seeds these into the `rule_types` table. Order here is the
//! display order of relationship reports.

use crate::entities::RuleType;
use crate::enums::SchemeCategory;

const PERMISSION_TYPES: &[(&str, &str)] = &[
    ("ADMINISTER_PROJECTS", "Administer Projects"),
    ("BROWSE_PROJECTS", "Browse Projects"),
    ("VIEW_DEV_TOOLS", "View Development Tools"),
    ("VIEW_READONLY_WORKFLOW", "View Read-Only Workflow"),
    ("CREATE_ISSUES", "Create Issues"),
    ("EDIT_ISSUES", "Edit Issues"),
    ("TRANSITION_ISSUES", "Transition Issues"),
    ("SCHEDULE_ISSUES", "Schedule Issues"),
    ("MOVE_ISSUES", "Move Issues"),
    ("ASSIGN_ISSUES", "Assign Issues"),
    ("ASSIGNABLE_USER", "Assignable User"),
    ("RESOLVE_ISSUES", "Resolve Issues"),
    ("CLOSE_ISSUES", "Close Issues"),
    ("MODIFY_REPORTER", "Modify Reporter"),
    ("DELETE_ISSUES", "Delete Issues"),
    ("LINK_ISSUES", "Link Issues"),
    ("SET_ISSUE_SECURITY", "Set Issue Security"),
    ("VIEW_VOTERS_AND_WATCHERS", "View Voters and Watchers"),
    ("MANAGE_WATCHERS", "Manage Watchers"),
    ("ADD_COMMENTS", "Add Comments"),
    ("EDIT_ALL_COMMENTS", "Edit All Comments"),
    ("EDIT_OWN_COMMENTS", "Edit Own Comments"),
    ("DELETE_ALL_COMMENTS", "Delete All Comments"),
    ("DELETE_OWN_COMMENTS", "Delete Own Comments"),
    ("CREATE_ATTACHMENTS", "Create Attachments"),
    ("DELETE_ALL_ATTACHMENTS", "Delete All Attachments"),
    ("DELETE_OWN_ATTACHMENTS", "Delete Own Attachments"),
    ("WORK_ON_ISSUES", "Work On Issues"),
    ("EDIT_OWN_WORKLOGS", "Edit Own Worklogs"),
    ("EDIT_ALL_WORKLOGS", "Edit All Worklogs"),
    ("DELETE_OWN_WORKLOGS", "Delete Own Worklogs"),
    ("DELETE_ALL_WORKLOGS", "Delete All Worklogs"),
];

const NOTIFICATION_TYPES: &[(&str, &str)] = &[
    ("ISSUE_CREATED", "Issue Created"),
    ("ISSUE_UPDATED", "Issue Updated"),
    ("ISSUE_ASSIGNED", "Issue Assigned"),
    ("ISSUE_RESOLVED", "Issue Resolved"),
    ("ISSUE_CLOSED", "Issue Closed"),
    ("ISSUE_COMMENTED", "Issue Commented"),
    ("ISSUE_COMMENT_EDITED", "Issue Comment Edited"),
    ("ISSUE_COMMENT_DELETED", "Issue Comment Deleted"),
    ("ISSUE_REOPENED", "Issue Reopened"),
    ("ISSUE_DELETED", "Issue Deleted"),
    ("ISSUE_MOVED", "Issue Moved"),
    ("WORK_LOGGED", "Work Logged On Issue"),
    ("WORK_STARTED", "Work Started On Issue"),
    ("WORK_STOPPED", "Work Stopped On Issue"),
    ("ISSUE_WORKLOG_UPDATED", "Issue Worklog Updated"),
    ("ISSUE_WORKLOG_DELETED", "Issue Worklog Deleted"),
    ("GENERIC_EVENT", "Generic Event"),
];

/// The built-in rule types for `category`, in display order.
#[must_use]
pub fn default_rule_types(category: SchemeCategory) -> Vec<RuleType> {
    let table = match category {
        SchemeCategory::Permission => PERMISSION_TYPES,
        SchemeCategory::Notification => NOTIFICATION_TYPES,
    };
    table
        .iter()
        .map(|(id, label)| RuleType::new(category, id, label))
        .collect()
}
