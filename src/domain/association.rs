//! Replacement of the student/teacher link set owned by one person.

use serde::Serialize;

use crate::entities::person::{Discriminator, PersonId};

/// One row of `student_teachers`: this teacher teaches this student.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct StudentTeacher {
    pub student_id: PersonId,
    pub teacher_id: PersonId,
}

impl StudentTeacher {
    /// Builds the row for `owner_id` of kind `owner` linked to `counterpart_id`.
    /// Both keys are always populated, whichever side initiated the link.
    pub fn link(owner: Discriminator, owner_id: PersonId, counterpart_id: PersonId) -> Self {
        match owner {
            Discriminator::Student => StudentTeacher {
                student_id: owner_id,
                teacher_id: counterpart_id,
            },
            Discriminator::Teacher => StudentTeacher {
                student_id: counterpart_id,
                teacher_id: owner_id,
            },
        }
    }

    /// The id on the side opposite to `owner`.
    pub fn counterpart_of(&self, owner: Discriminator) -> PersonId {
        match owner {
            Discriminator::Student => self.teacher_id,
            Discriminator::Teacher => self.student_id,
        }
    }
}

/// What a create/update request asks for regarding the owner's links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssociationUpdate {
    /// No ids supplied: the existing links stay as they are.
    Keep,
    /// Replace every existing link with one link per id.
    Replace(Vec<PersonId>),
}

impl AssociationUpdate {
    /// An absent or empty id list keeps the current links. Duplicate ids
    /// collapse to a single link, first occurrence wins the position.
    pub fn from_ids(ids: Option<&[PersonId]>) -> Self {
        match ids {
            Some(ids) if !ids.is_empty() => {
                let mut unique = Vec::with_capacity(ids.len());
                for id in ids {
                    if !unique.contains(id) {
                        unique.push(*id);
                    }
                }
                AssociationUpdate::Replace(unique)
            }
            _ => AssociationUpdate::Keep,
        }
    }

    pub fn counterpart_ids(&self) -> &[PersonId] {
        match self {
            AssociationUpdate::Keep => &[],
            AssociationUpdate::Replace(ids) => ids,
        }
    }

    /// Rows that replace the owner's current link set, or `None` to keep it.
    pub fn rows_for(&self, owner: Discriminator, owner_id: PersonId) -> Option<Vec<StudentTeacher>> {
        match self {
            AssociationUpdate::Keep => None,
            AssociationUpdate::Replace(ids) => Some(
                ids.iter()
                    .map(|counterpart| StudentTeacher::link(owner, owner_id, *counterpart))
                    .collect(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_or_empty_ids_keep_existing_links() {
        assert_eq!(AssociationUpdate::from_ids(None), AssociationUpdate::Keep);
        assert_eq!(AssociationUpdate::from_ids(Some(&[])), AssociationUpdate::Keep);
        assert_eq!(AssociationUpdate::Keep.rows_for(Discriminator::Student, 1), None);
    }

    #[test]
    fn duplicate_ids_collapse() {
        let update = AssociationUpdate::from_ids(Some(&[4, 2, 4, 7, 2]));
        assert_eq!(update, AssociationUpdate::Replace(vec![4, 2, 7]));
    }

    #[test]
    fn student_owned_rows_put_owner_in_student_column() {
        let rows = AssociationUpdate::from_ids(Some(&[10, 11]))
            .rows_for(Discriminator::Student, 1)
            .unwrap();

        assert_eq!(
            rows,
            vec![
                StudentTeacher { student_id: 1, teacher_id: 10 },
                StudentTeacher { student_id: 1, teacher_id: 11 },
            ]
        );
    }

    #[test]
    fn teacher_owned_rows_populate_both_keys() {
        let rows = AssociationUpdate::from_ids(Some(&[3]))
            .rows_for(Discriminator::Teacher, 9)
            .unwrap();

        assert_eq!(rows, vec![StudentTeacher { student_id: 3, teacher_id: 9 }]);
        assert_eq!(rows[0].counterpart_of(Discriminator::Teacher), 3);
        assert_eq!(rows[0].counterpart_of(Discriminator::Student), 9);
    }
}
