//! Request handler definitions
//!
//! Define each route and it handler here.
//! Handlers that are more than a line or two MUST go into a separate module. Keep this module neat and tidy 🙏
//!
//! Since each worker thread processes its requests sequentially, handlers must never block the current thread.
//! Anything that touches the database is expressed as a future and awaited.
use actix_web::{get, web, HttpResponse, Responder};
use gradebook_engine::{traits::GradebookManagement, GradesApi};
use log::*;

use crate::{
    auth::{AccessClaims, Role},
    errors::ServerError,
};

// Web-actix cannot handle generics in handlers, so it's implemented manually using the `route!` macro
#[macro_export]
macro_rules! route {
    ($name:ident => $method:ident $path:literal impl $($bounds:ty),+ where requires [$($roles:expr),+]) => {
        paste::paste! { pub struct [<$name:camel Route>]<A>(core::marker::PhantomData<fn() -> A>);}
        paste::paste! { impl<A> [<$name:camel Route>]<A> {
            #[allow(clippy::new_without_default)]
            pub fn new() -> Self {
                Self(core::marker::PhantomData::<fn() -> A>)
            }
        }}
        paste::paste! { impl<A> actix_web::dev::HttpServiceFactory for [<$name:camel Route>]<A>
        where
            A: $($bounds)++ 'static,
        {
            fn register(self, config: &mut actix_web::dev::AppService) {
                let res = actix_web::Resource::new($path)
                    .name(stringify!($name))
                    .guard(actix_web::guard::$method())
                    .to($name::<A>)
                    .wrap($crate::middleware::AclMiddlewareFactory::new(&[$($roles),+]));
                actix_web::dev::HttpServiceFactory::register(res, config);
            }
        }}
    };
}

// ----------------------------------------------   Health  ----------------------------------------------------
#[get("/health")]
pub async fn health() -> impl Responder {
    trace!("💻️ Received health check request");
    HttpResponse::Ok().body("👍️\n")
}

//----------------------------------------------   Students  ----------------------------------------------------
route!(my_grades => Get "/alumno/mis-calificaciones" impl GradebookManagement where requires [Role::Alumno]);
/// The grades of the authenticated student, across all subjects, ordered by grade id.
///
/// Returns a JSON array of `{id, materia, profesor, calificacion}` objects. A registered student without grades
/// gets an empty array. A principal with the `alumno` role but no student record gets a 404.
pub async fn my_grades<B: GradebookManagement>(
    claims: AccessClaims,
    api: web::Data<GradesApi<B>>,
) -> Result<HttpResponse, ServerError> {
    debug!("💻️ GET my grades for {}", claims.sub);
    let grades = api.student_grades(claims.external_id()).await?;
    Ok(HttpResponse::Ok().json(grades))
}

//----------------------------------------------   Teachers  ----------------------------------------------------
route!(my_students => Get "/profesor/mis-alumnos" impl GradebookManagement where requires [Role::Docente]);
/// The roster of the authenticated teacher: the subject they teach and every grade recorded in their subjects.
///
/// Returns `{materiaImpartida, alumnos: [{id, nombre, calificacion, aprobado}]}`. A teacher without any recorded
/// grades gets `"Sin Asignación"` and an empty list.
pub async fn my_students<B: GradebookManagement>(
    claims: AccessClaims,
    api: web::Data<GradesApi<B>>,
) -> Result<HttpResponse, ServerError> {
    debug!("💻️ GET my students for {}", claims.sub);
    let roster = api.teacher_roster(claims.external_id()).await?;
    Ok(HttpResponse::Ok().json(roster))
}
