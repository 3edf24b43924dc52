use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::sqlite::SqliteConnection;
use log::debug;

use tellerhome_core::enrollments::{EnrollmentRepositoryTrait, NewEnrollment, UserEnrollment};
use tellerhome_core::errors::{Error, Result};

use super::model::{NewUserEnrollmentDB, UserEnrollmentDB};
use crate::db::{get_connection, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::user_enrollments;
use crate::schema::user_enrollments::dsl;

pub struct EnrollmentRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl EnrollmentRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        Self { pool, writer }
    }
}

fn load_by_enrollment_id(
    conn: &mut SqliteConnection,
    enrollment_id: &str,
) -> Result<Option<UserEnrollmentDB>> {
    user_enrollments::table
        .filter(dsl::enrollment_id.eq(enrollment_id))
        .select(UserEnrollmentDB::as_select())
        .first::<UserEnrollmentDB>(conn)
        .optional()
        .into_core()
}

#[async_trait]
impl EnrollmentRepositoryTrait for EnrollmentRepository {
    async fn upsert(&self, enrollment: NewEnrollment) -> Result<UserEnrollment> {
        self.writer
            .exec(move |conn| {
                let now = Utc::now().naive_utc();

                match load_by_enrollment_id(conn, &enrollment.enrollment_id)? {
                    Some(existing) => {
                        debug!("Refreshing enrollment {}", existing.enrollment_id);
                        let institution = enrollment
                            .institution_name
                            .or(existing.institution_name);
                        diesel::update(user_enrollments::table.find(existing.id))
                            .set((
                                dsl::access_token.eq(enrollment.access_token),
                                dsl::is_active.eq(true),
                                dsl::institution_name.eq(institution),
                                dsl::updated_at.eq(now),
                            ))
                            .execute(conn)
                            .into_core()?;
                    }
                    None => {
                        debug!("Creating enrollment {}", enrollment.enrollment_id);
                        diesel::insert_into(user_enrollments::table)
                            .values(NewUserEnrollmentDB {
                                enrollment_id: enrollment.enrollment_id.clone(),
                                user_id: enrollment.user_id,
                                access_token: enrollment.access_token,
                                institution_name: enrollment.institution_name,
                                is_active: true,
                                created_at: now,
                                updated_at: now,
                            })
                            .execute(conn)
                            .into_core()?;
                    }
                }

                load_by_enrollment_id(conn, &enrollment.enrollment_id)?
                    .map(UserEnrollment::from)
                    .ok_or_else(|| Error::not_found("Enrollment", enrollment.enrollment_id))
            })
            .await
    }

    async fn deactivate(&self, enrollment_id: &str) -> Result<UserEnrollment> {
        let enrollment_id = enrollment_id.to_string();
        self.writer
            .exec(move |conn| {
                let affected = diesel::update(
                    user_enrollments::table.filter(dsl::enrollment_id.eq(&enrollment_id)),
                )
                .set((
                    dsl::is_active.eq(false),
                    dsl::updated_at.eq(Utc::now().naive_utc()),
                ))
                .execute(conn)
                .into_core()?;

                if affected == 0 {
                    return Err(Error::not_found("Enrollment", enrollment_id));
                }
                load_by_enrollment_id(conn, &enrollment_id)?
                    .map(UserEnrollment::from)
                    .ok_or_else(|| Error::not_found("Enrollment", enrollment_id))
            })
            .await
    }

    async fn mark_synced(&self, enrollment_id: &str, synced_at: NaiveDateTime) -> Result<()> {
        let enrollment_id = enrollment_id.to_string();
        self.writer
            .exec(move |conn| {
                let affected = diesel::update(
                    user_enrollments::table.filter(dsl::enrollment_id.eq(&enrollment_id)),
                )
                .set((dsl::last_synced.eq(Some(synced_at)), dsl::updated_at.eq(synced_at)))
                .execute(conn)
                .into_core()?;

                if affected == 0 {
                    return Err(Error::not_found("Enrollment", enrollment_id));
                }
                Ok(())
            })
            .await
    }

    fn get_by_enrollment_id(&self, enrollment_id: &str) -> Result<Option<UserEnrollment>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(load_by_enrollment_id(&mut conn, enrollment_id)?.map(UserEnrollment::from))
    }

    fn list_active(&self) -> Result<Vec<UserEnrollment>> {
        let mut conn = get_connection(&self.pool)?;

        let rows = user_enrollments::table
            .filter(dsl::is_active.eq(true))
            .order(dsl::id.asc())
            .select(UserEnrollmentDB::as_select())
            .load::<UserEnrollmentDB>(&mut conn)
            .into_core()?;

        Ok(rows.into_iter().map(UserEnrollment::from).collect())
    }

    fn list_active_for_user(&self, user_id: &str) -> Result<Vec<UserEnrollment>> {
        let mut conn = get_connection(&self.pool)?;

        let rows = user_enrollments::table
            .filter(dsl::is_active.eq(true))
            .filter(dsl::user_id.eq(user_id))
            .order(dsl::id.asc())
            .select(UserEnrollmentDB::as_select())
            .load::<UserEnrollmentDB>(&mut conn)
            .into_core()?;

        Ok(rows.into_iter().map(UserEnrollment::from).collect())
    }
}
