//! Project phases and their todo lists.

use crate::core::{Entity, Result, StateError};
use crate::projection::format::parse_timestamp;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PhaseStatus {
    #[serde(rename = "Completed")]
    Completed,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Not Started")]
    NotStarted,
}

impl PhaseStatus {
    /// Sort key: in-progress work first, finished work last.
    fn priority(self) -> u8 {
        match self {
            PhaseStatus::InProgress => 1,
            PhaseStatus::NotStarted => 2,
            PhaseStatus::Completed => 3,
        }
    }
}

impl fmt::Display for PhaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PhaseStatus::Completed => "Completed",
            PhaseStatus::InProgress => "In Progress",
            PhaseStatus::NotStarted => "Not Started",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: String,
    pub title: String,
    pub completed: bool,
    #[serde(default)]
    pub date: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskProgress {
    pub completed: usize,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Phase {
    pub id: String,
    pub name: String,
    pub status: PhaseStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default)]
    pub tasks: TaskProgress,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deliverable: Option<String>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub deadline: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub todos: Vec<Todo>,
}

impl Entity for Phase {
    type Id = String;

    fn id(&self) -> &String {
        &self.id
    }
}

impl Phase {
    /// Share of completed tasks, rounded to a whole percent.
    pub fn completion_percentage(&self) -> u32 {
        percentage(self.tasks.completed, self.tasks.total)
    }

    /// Whole days until the deadline, rounded up. `None` if the deadline is not a date.
    pub fn days_until_deadline(&self, now: DateTime<Utc>) -> Option<i64> {
        let deadline = parse_timestamp(&self.deadline)?;
        let millis = (deadline - now).num_milliseconds();
        Some((millis as f64 / 86_400_000.0).ceil() as i64)
    }

    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        if self.status == PhaseStatus::Completed {
            return false;
        }
        self.days_until_deadline(now).is_some_and(|days| days < 0)
    }

    /// Flips a todo and recounts completed tasks. Returns the new state.
    pub fn toggle_todo(&mut self, todo_id: &str) -> Result<bool> {
        let todo = self
            .todos
            .iter_mut()
            .find(|todo| todo.id == todo_id)
            .ok_or_else(|| {
                StateError::NotFound(todo_id.to_string(), format!("todos of phase {}", self.id))
            })?;
        todo.completed = !todo.completed;
        let state = todo.completed;
        self.recount_tasks();
        Ok(state)
    }

    pub fn recount_tasks(&mut self) {
        self.tasks = TaskProgress {
            completed: self.todos.iter().filter(|todo| todo.completed).count(),
            total: self.todos.len(),
        };
    }

    /// Checks the fields a phase card cannot render without.
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("id", &self.id),
            ("name", &self.name),
            ("description", &self.description),
            ("deadline", &self.deadline),
            ("price", &self.price),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(StateError::Validation(format!(
                    "phase field '{}' is required",
                    field
                )));
            }
        }
        Ok(())
    }

    pub fn next_in<'a>(phases: &'a [Phase], current_id: &str) -> Option<&'a Phase> {
        let index = phases.iter().position(|phase| phase.id == current_id)?;
        phases.get(index + 1)
    }

    pub fn previous_in<'a>(phases: &'a [Phase], current_id: &str) -> Option<&'a Phase> {
        let index = phases.iter().position(|phase| phase.id == current_id)?;
        index.checked_sub(1).map(|prev| &phases[prev])
    }

    /// Stable sort: In Progress, then Not Started, then Completed.
    pub fn sorted_by_priority(phases: &[Phase]) -> Vec<Phase> {
        let mut sorted = phases.to_vec();
        sorted.sort_by_key(|phase| phase.status.priority());
        sorted
    }

    pub fn incomplete_todos(phases: &[Phase]) -> Vec<IncompleteTodo> {
        phases
            .iter()
            .flat_map(|phase| {
                phase
                    .todos
                    .iter()
                    .filter(|todo| !todo.completed)
                    .map(|todo| IncompleteTodo {
                        phase_name: phase.name.clone(),
                        todo: todo.clone(),
                    })
            })
            .collect()
    }
}

fn percentage(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    ((part as f64 / whole as f64) * 100.0).round() as u32
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncompleteTodo {
    pub phase_name: String,
    pub todo: Todo,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PhaseStatistics {
    pub total: usize,
    pub completed: usize,
    pub in_progress: usize,
    pub not_started: usize,
    /// Task-weighted completion across all phases, in percent
    pub overall_completion: u32,
}

impl PhaseStatistics {
    pub fn from_phases(phases: &[Phase]) -> Self {
        let count = |status| phases.iter().filter(|phase| phase.status == status).count();
        let total_tasks: usize = phases.iter().map(|phase| phase.tasks.total).sum();
        let completed_tasks: usize = phases.iter().map(|phase| phase.tasks.completed).sum();

        Self {
            total: phases.len(),
            completed: count(PhaseStatus::Completed),
            in_progress: count(PhaseStatus::InProgress),
            not_started: count(PhaseStatus::NotStarted),
            overall_completion: percentage(completed_tasks, total_tasks),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoDraft {
    /// Existing todo id when editing; fresh ids are minted otherwise
    #[serde(default)]
    pub id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub completed: bool,
}

impl TodoDraft {
    pub fn new(title: &str, date: &str) -> Self {
        Self {
            id: None,
            title: title.to_string(),
            date: date.to_string(),
            completed: false,
        }
    }

    fn into_todo(self) -> Todo {
        Todo {
            id: self.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            title: self.title,
            completed: self.completed,
            date: self.date,
        }
    }
}

/// Phase form input, as entered in the add/edit dialogs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseDraft {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub deadline: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub deliverable: String,
    /// Only honoured when editing; new phases always start Not Started
    #[serde(default)]
    pub status: Option<PhaseStatus>,
    #[serde(default)]
    pub todos: Vec<TodoDraft>,
}

impl PhaseDraft {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    pub fn deadline(mut self, deadline: &str) -> Self {
        self.deadline = deadline.to_string();
        self
    }

    pub fn price(mut self, price: &str) -> Self {
        self.price = price.to_string();
        self
    }

    pub fn description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn todo(mut self, todo: TodoDraft) -> Self {
        self.todos.push(todo);
        self
    }

    /// Builds a brand new phase.
    pub fn into_phase(self) -> Result<Phase> {
        let todos = self.checked_todos()?;
        let deliverable = non_empty(self.deliverable);

        Ok(Phase {
            id: Uuid::new_v4().to_string(),
            name: self.name,
            status: PhaseStatus::NotStarted,
            completed_date: None,
            due_date: None,
            start_date: Some(self.deadline.clone()),
            tasks: TaskProgress {
                completed: 0,
                total: todos.len(),
            },
            deliverable,
            is_active: false,
            description: self.description,
            deadline: self.deadline,
            price: self.price,
            todos: todos
                .into_iter()
                .map(|todo| Todo {
                    completed: false,
                    ..todo
                })
                .collect(),
        })
    }

    /// Applies an edit on top of `phase`, keeping its id and dates.
    pub fn apply_to(self, phase: &Phase) -> Result<Phase> {
        let todos = self.checked_todos()?;
        let mut updated = Phase {
            name: self.name,
            description: self.description,
            deadline: self.deadline,
            price: self.price,
            deliverable: non_empty(self.deliverable),
            status: self.status.unwrap_or(phase.status),
            todos,
            ..phase.clone()
        };
        updated.recount_tasks();
        Ok(updated)
    }

    fn checked_todos(&self) -> Result<Vec<Todo>> {
        if self.name.trim().is_empty() {
            return Err(StateError::Validation("Please enter a phase name".into()));
        }

        let todos: Vec<Todo> = self
            .todos
            .iter()
            .filter(|todo| !todo.title.trim().is_empty())
            .cloned()
            .map(TodoDraft::into_todo)
            .collect();

        if todos.is_empty() {
            return Err(StateError::Validation("Please add at least one task".into()));
        }
        Ok(todos)
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn phase(id: &str, status: PhaseStatus, completed: usize, total: usize) -> Phase {
        Phase {
            id: id.to_string(),
            name: format!("phase {}", id),
            status,
            completed_date: None,
            due_date: None,
            start_date: None,
            tasks: TaskProgress { completed, total },
            deliverable: None,
            is_active: false,
            description: "desc".to_string(),
            deadline: "2024-11-12".to_string(),
            price: "$1,500".to_string(),
            todos: Vec::new(),
        }
    }

    #[test]
    fn test_statistics() {
        let phases = vec![
            phase("1", PhaseStatus::Completed, 4, 4),
            phase("2", PhaseStatus::InProgress, 1, 3),
            phase("3", PhaseStatus::NotStarted, 0, 3),
        ];
        let stats = PhaseStatistics::from_phases(&phases);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.completed, 1);
        assert_eq!(stats.in_progress, 1);
        assert_eq!(stats.not_started, 1);
        // 5 of 10 tasks
        assert_eq!(stats.overall_completion, 50);
    }

    #[test]
    fn test_statistics_empty() {
        assert_eq!(PhaseStatistics::from_phases(&[]), PhaseStatistics::default());
    }

    #[test]
    fn test_completion_percentage_rounds() {
        assert_eq!(phase("1", PhaseStatus::InProgress, 1, 3).completion_percentage(), 33);
        assert_eq!(phase("1", PhaseStatus::InProgress, 2, 3).completion_percentage(), 67);
        assert_eq!(phase("1", PhaseStatus::NotStarted, 0, 0).completion_percentage(), 0);
    }

    #[test]
    fn test_next_and_previous() {
        let phases = vec![
            phase("1", PhaseStatus::Completed, 0, 0),
            phase("2", PhaseStatus::InProgress, 0, 0),
        ];
        assert_eq!(Phase::next_in(&phases, "1").map(|p| p.id.as_str()), Some("2"));
        assert!(Phase::next_in(&phases, "2").is_none());
        assert_eq!(Phase::previous_in(&phases, "2").map(|p| p.id.as_str()), Some("1"));
        assert!(Phase::previous_in(&phases, "1").is_none());
        assert!(Phase::next_in(&phases, "nope").is_none());
    }

    #[test]
    fn test_sorted_by_priority_is_stable() {
        let phases = vec![
            phase("a", PhaseStatus::Completed, 0, 0),
            phase("b", PhaseStatus::NotStarted, 0, 0),
            phase("c", PhaseStatus::InProgress, 0, 0),
            phase("d", PhaseStatus::NotStarted, 0, 0),
        ];
        let ids: Vec<String> = Phase::sorted_by_priority(&phases)
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec!["c", "b", "d", "a"]);
    }

    #[test]
    fn test_overdue() {
        let now = Utc.with_ymd_and_hms(2024, 11, 20, 12, 0, 0).unwrap();
        let late = phase("1", PhaseStatus::InProgress, 0, 1);
        assert!(late.is_overdue(now));
        assert_eq!(late.days_until_deadline(now), Some(-8));

        let done = phase("2", PhaseStatus::Completed, 1, 1);
        assert!(!done.is_overdue(now));

        let mut vague = phase("3", PhaseStatus::InProgress, 0, 1);
        vague.deadline = "Nov 12".to_string();
        assert!(!vague.is_overdue(now));
    }

    #[test]
    fn test_toggle_todo_recounts() {
        let mut p = phase("1", PhaseStatus::InProgress, 0, 0);
        p.todos = vec![
            Todo {
                id: "t1".into(),
                title: "a".into(),
                completed: false,
                date: String::new(),
            },
            Todo {
                id: "t2".into(),
                title: "b".into(),
                completed: true,
                date: String::new(),
            },
        ];
        assert!(p.toggle_todo("t1").unwrap());
        assert_eq!(p.tasks, TaskProgress { completed: 2, total: 2 });
        assert!(matches!(p.toggle_todo("zz"), Err(StateError::NotFound(..))));
    }

    #[test]
    fn test_validate() {
        let mut p = phase("1", PhaseStatus::NotStarted, 0, 0);
        assert!(p.validate().is_ok());
        p.price = "  ".into();
        assert_eq!(
            p.validate(),
            Err(StateError::Validation("phase field 'price' is required".into()))
        );
    }

    #[test]
    fn test_draft_builds_not_started_phase() {
        let phase = PhaseDraft::new("Testing")
            .deadline("2024-12-01")
            .price("$900")
            .todo(TodoDraft::new("Write tests", "Nov 20"))
            .todo(TodoDraft::new("   ", ""))
            .todo(TodoDraft::new("Fix bugs", "Nov 25"))
            .into_phase()
            .unwrap();

        assert_eq!(phase.status, PhaseStatus::NotStarted);
        assert_eq!(phase.start_date.as_deref(), Some("2024-12-01"));
        assert_eq!(phase.tasks, TaskProgress { completed: 0, total: 2 });
        assert_eq!(phase.todos.len(), 2);
        assert_ne!(phase.todos[0].id, phase.todos[1].id);
        assert!(phase.deliverable.is_none());
    }

    #[test]
    fn test_draft_validation() {
        let blank = PhaseDraft::new(" ").todo(TodoDraft::new("x", "")).into_phase();
        assert_eq!(
            blank,
            Err(StateError::Validation("Please enter a phase name".into()))
        );

        let no_tasks = PhaseDraft::new("Design").into_phase();
        assert_eq!(
            no_tasks,
            Err(StateError::Validation("Please add at least one task".into()))
        );
    }

    #[test]
    fn test_draft_apply_keeps_identity() {
        let original = phase("7", PhaseStatus::InProgress, 0, 0);
        let mut done = TodoDraft::new("Review", "");
        done.completed = true;
        let draft = PhaseDraft {
            status: Some(PhaseStatus::Completed),
            ..PhaseDraft::new("Renamed")
        }
        .todo(done)
        .todo(TodoDraft::new("Ship", ""));

        let updated = draft.apply_to(&original).unwrap();
        assert_eq!(updated.id, "7");
        assert_eq!(updated.name, "Renamed");
        assert_eq!(updated.status, PhaseStatus::Completed);
        assert_eq!(updated.tasks, TaskProgress { completed: 1, total: 2 });
    }

    #[test]
    fn test_phase_reads_camel_case_json() {
        let phase: Phase = serde_json::from_str(
            r#"{
                "id": "2",
                "name": "UI Design",
                "status": "In Progress",
                "dueDate": "Nov 12",
                "tasks": { "completed": 1, "total": 3 },
                "icon": "folder_supervised",
                "isActive": true,
                "description": "High fidelity design",
                "deadline": "Nov 12",
                "price": "$2,500",
                "todos": [{ "id": "1", "title": "Finalize Color Palette", "completed": true, "date": "Oct 30" }]
            }"#,
        )
        .unwrap();

        assert_eq!(phase.status, PhaseStatus::InProgress);
        assert_eq!(phase.due_date.as_deref(), Some("Nov 12"));
        assert!(phase.is_active);
        assert_eq!(phase.todos.len(), 1);
    }
}
