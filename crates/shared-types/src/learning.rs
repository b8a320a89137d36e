use serde::{Deserialize, Serialize};

use crate::role::Role;

/// Self-paced training content for staff and families.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct LearningModule {
    pub id: String,
    pub title: String,
    pub category: String,
    pub description: String,
    pub duration_minutes: u32,
    /// Roles the module is written for.
    pub audience: Vec<Role>,
    /// 0..=100
    #[serde(default)]
    pub completion: u8,
}

impl LearningModule {
    pub fn is_for(&self, role: Role) -> bool {
        role == Role::Admin || self.audience.contains(&role)
    }

    pub fn is_complete(&self) -> bool {
        self.completion >= 100
    }
}

/// Modules visible to `role`. Admins see the whole catalogue.
pub fn modules_for(modules: &[LearningModule], role: Role) -> Vec<LearningModule> {
    modules.iter().filter(|m| m.is_for(role)).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn module(id: &str, audience: Vec<Role>) -> LearningModule {
        LearningModule {
            id: id.into(),
            title: "Visual schedules at home".into(),
            category: "Routines".into(),
            description: "Building predictable routines with picture cards".into(),
            duration_minutes: 25,
            audience,
            completion: 0,
        }
    }

    #[test]
    fn audience_filters_by_role() {
        let catalogue = vec![
            module("m1", vec![Role::Caregiver]),
            module("m2", vec![Role::Teacher, Role::Therapist]),
        ];
        let caregiver = modules_for(&catalogue, Role::Caregiver);
        assert_eq!(caregiver.len(), 1);
        assert_eq!(caregiver[0].id, "m1");
        assert!(modules_for(&catalogue, Role::Hr).is_empty());
    }

    #[test]
    fn admin_sees_everything() {
        let catalogue = vec![module("m1", vec![Role::Caregiver]), module("m2", vec![])];
        assert_eq!(modules_for(&catalogue, Role::Admin).len(), 2);
    }
}
