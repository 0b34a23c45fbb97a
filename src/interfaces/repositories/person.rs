use async_trait::async_trait;
use sqlx::{PgConnection, Postgres, QueryBuilder};

use crate::{
    association::{AssociationUpdate, StudentTeacher},
    entities::{
        person::{person_id_from_db, Discriminator, Person, PersonId, PersonRow},
        student::Student,
    },
    errors::AppError,
    kind::{PersonKind, StudentKind},
    repositories::sqlx_repo::SqlxPersonRepo,
};

#[async_trait]
pub trait PersonRepository<K: PersonKind>: Send + Sync {
    /// Stores a new entity and its links in one transaction, returning the new id.
    async fn insert_person(&self, entity: &K::Entity, links: &AssociationUpdate) -> Result<PersonId, AppError>;

    async fn find_by_id(&self, id: PersonId) -> Result<Option<K::Entity>, AppError>;

    /// First entity (lowest id) whose name equals `name` exactly.
    async fn find_by_name(&self, name: &str) -> Result<Option<K::Entity>, AppError>;

    async fn list_all(&self) -> Result<Vec<K::Entity>, AppError>;

    /// Overwrites the stored entity and applies `links` in one transaction.
    /// Returns false when no entity of this kind has the entity's id.
    async fn update_person(&self, entity: &K::Entity, links: &AssociationUpdate) -> Result<bool, AppError>;

    /// Removes the entity and, by cascade, its links. Returns false when absent.
    async fn delete_person(&self, id: PersonId) -> Result<bool, AppError>;

    async fn find_links(&self, id: PersonId) -> Result<Vec<StudentTeacher>, AppError>;

    /// The subset of `ids` that does not name a stored person of the counterpart kind.
    async fn missing_counterparts(&self, ids: &[PersonId]) -> Result<Vec<PersonId>, AppError>;
}

#[async_trait]
pub trait StudentRepository: PersonRepository<StudentKind> {
    /// Students linked to at least one teacher whose name contains `fragment`.
    async fn find_by_teacher_name(&self, fragment: &str) -> Result<Vec<Student>, AppError>;
}

#[async_trait]
pub trait HealthRepository: Send + Sync {
    async fn check_connection(&self) -> Result<(), AppError>;
}

fn decode<K: PersonKind>(row: PersonRow) -> Result<K::Entity, AppError> {
    let id = row.id;
    let person = Person::try_from(row)?;
    K::from_person(person).ok_or_else(|| {
        AppError::InternalError(format!("Person {} is not a {}", id, K::label()))
    })
}

fn owner_column(owner: Discriminator) -> &'static str {
    match owner {
        Discriminator::Student => "student_id",
        Discriminator::Teacher => "teacher_id",
    }
}

async fn replace_links(
    conn: &mut PgConnection,
    owner: Discriminator,
    owner_id: PersonId,
    links: &AssociationUpdate,
) -> Result<(), AppError> {
    let Some(rows) = links.rows_for(owner, owner_id) else {
        return Ok(());
    };

    let delete_sql = match owner {
        Discriminator::Student => "DELETE FROM student_teachers WHERE student_id = $1",
        Discriminator::Teacher => "DELETE FROM student_teachers WHERE teacher_id = $1",
    };
    sqlx::query(delete_sql)
        .bind(i64::from(owner_id))
        .execute(&mut *conn)
        .await?;

    if rows.is_empty() {
        return Ok(());
    }

    let mut builder: QueryBuilder<Postgres> =
        QueryBuilder::new("INSERT INTO student_teachers (student_id, teacher_id) ");
    builder.push_values(rows.iter(), |mut b, row| {
        b.push_bind(i64::from(row.student_id))
            .push_bind(i64::from(row.teacher_id));
    });
    builder.build().execute(&mut *conn).await?;

    tracing::debug!("Replaced {} links of {} {}", rows.len(), owner, owner_id);
    Ok(())
}

#[async_trait]
impl<K: PersonKind> PersonRepository<K> for SqlxPersonRepo {
    async fn insert_person(&self, entity: &K::Entity, links: &AssociationUpdate) -> Result<PersonId, AppError> {
        let insert = K::to_insert(entity);
        let mut tx = self.pool.begin().await?;

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO person (
                discriminator, name, date_of_birth, pin, sex, email,
                major, year_of_study, gpa, gpa_status, subject, experience
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING id
            "#,
        )
        .bind(insert.discriminator.as_str())
        .bind(&insert.name)
        .bind(insert.date_of_birth)
        .bind(&insert.pin)
        .bind(insert.sex.to_string())
        .bind(&insert.email)
        .bind(&insert.major)
        .bind(insert.year_of_study)
        .bind(insert.gpa)
        .bind(insert.gpa_status.map(|s| s.as_str()))
        .bind(&insert.subject)
        .bind(insert.experience)
        .fetch_one(&mut *tx)
        .await?;

        let id = person_id_from_db(id)?;
        replace_links(&mut *tx, K::DISCRIMINATOR, id, links).await?;
        tx.commit().await?;

        Ok(id)
    }

    async fn find_by_id(&self, id: PersonId) -> Result<Option<K::Entity>, AppError> {
        let row = sqlx::query_as::<_, PersonRow>(
            "SELECT * FROM person WHERE id = $1 AND discriminator = $2",
        )
        .bind(i64::from(id))
        .bind(K::DISCRIMINATOR.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(decode::<K>).transpose()
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<K::Entity>, AppError> {
        let row = sqlx::query_as::<_, PersonRow>(
            "SELECT * FROM person WHERE name = $1 AND discriminator = $2 ORDER BY id LIMIT 1",
        )
        .bind(name)
        .bind(K::DISCRIMINATOR.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(decode::<K>).transpose()
    }

    async fn list_all(&self) -> Result<Vec<K::Entity>, AppError> {
        sqlx::query_as::<_, PersonRow>(
            "SELECT * FROM person WHERE discriminator = $1 ORDER BY id",
        )
        .bind(K::DISCRIMINATOR.as_str())
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(decode::<K>)
        .collect()
    }

    async fn update_person(&self, entity: &K::Entity, links: &AssociationUpdate) -> Result<bool, AppError> {
        let id = K::id(entity);
        let update = K::to_insert(entity);
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE person SET
                name = $1,
                date_of_birth = $2,
                pin = $3,
                sex = $4,
                email = $5,
                major = $6,
                year_of_study = $7,
                gpa = $8,
                gpa_status = $9,
                subject = $10,
                experience = $11
            WHERE id = $12 AND discriminator = $13
            "#,
        )
        .bind(&update.name)
        .bind(update.date_of_birth)
        .bind(&update.pin)
        .bind(update.sex.to_string())
        .bind(&update.email)
        .bind(&update.major)
        .bind(update.year_of_study)
        .bind(update.gpa)
        .bind(update.gpa_status.map(|s| s.as_str()))
        .bind(&update.subject)
        .bind(update.experience)
        .bind(i64::from(id))
        .bind(update.discriminator.as_str())
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(false);
        }

        replace_links(&mut *tx, K::DISCRIMINATOR, id, links).await?;
        tx.commit().await?;

        Ok(true)
    }

    async fn delete_person(&self, id: PersonId) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM person WHERE id = $1 AND discriminator = $2")
            .bind(i64::from(id))
            .bind(K::DISCRIMINATOR.as_str())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_links(&self, id: PersonId) -> Result<Vec<StudentTeacher>, AppError> {
        let sql = format!(
            "SELECT student_id, teacher_id FROM student_teachers WHERE {} = $1 ORDER BY student_id, teacher_id",
            owner_column(K::DISCRIMINATOR)
        );

        sqlx::query_as::<_, (i64, i64)>(&sql)
            .bind(i64::from(id))
            .fetch_all(&self.pool)
            .await?
            .into_iter()
            .map(|(student_id, teacher_id)| {
                Ok(StudentTeacher {
                    student_id: person_id_from_db(student_id)?,
                    teacher_id: person_id_from_db(teacher_id)?,
                })
            })
            .collect()
    }

    async fn missing_counterparts(&self, ids: &[PersonId]) -> Result<Vec<PersonId>, AppError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let wanted: Vec<i64> = ids.iter().map(|id| i64::from(*id)).collect();
        let found: Vec<i64> = sqlx::query_scalar(
            "SELECT id FROM person WHERE discriminator = $1 AND id = ANY($2)",
        )
        .bind(K::DISCRIMINATOR.counterpart().as_str())
        .bind(&wanted)
        .fetch_all(&self.pool)
        .await?;

        Ok(ids
            .iter()
            .copied()
            .filter(|id| !found.contains(&i64::from(*id)))
            .collect())
    }
}

#[async_trait]
impl StudentRepository for SqlxPersonRepo {
    async fn find_by_teacher_name(&self, fragment: &str) -> Result<Vec<Student>, AppError> {
        sqlx::query_as::<_, PersonRow>(
            r#"
            SELECT p.* FROM person p
            WHERE p.discriminator = 'Student'
              AND EXISTS (
                SELECT 1 FROM student_teachers st
                JOIN person t ON t.id = st.teacher_id
                WHERE st.student_id = p.id
                  AND t.discriminator = 'Teacher'
                  AND strpos(t.name, $1) > 0
              )
            ORDER BY p.id
            "#,
        )
        .bind(fragment)
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(decode::<StudentKind>)
        .collect()
    }
}

#[async_trait]
impl HealthRepository for SqlxPersonRepo {
    async fn check_connection(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(AppError::from)
    }
}
