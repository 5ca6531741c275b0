mod common;

use campus_core::db::open_db_in_memory;
use campus_core::{
    AssignmentRepository, CampusService, CourseInstructor, CourseRepository, CourseStudent,
    LessonRepository, ReadingRepository, ReadingScope, RepoError, RosterRepository,
    SchoolRepository, TermRepository, UserRepository,
};
use common::{assignment, course, lesson, loose_course, reading, school, term, user};

#[test]
fn destroying_a_lesson_removes_its_readings() {
    let conn = open_db_in_memory().unwrap();
    let service = CampusService::try_new(&conn).unwrap();
    let ruby = loose_course(&service, "RUB101", "Ruby");
    let intro = lesson(&service, &ruby, "Integrate databases with Ruby!");
    let other = lesson(&service, &ruby, "Blocks");
    reading(&service, &intro, 1);
    reading(&service, &intro, 2);
    let survivor = reading(&service, &other, 1);

    assert!(service.destroy_lesson(&intro).unwrap());

    assert_eq!(service.lessons().get_lesson(intro.id.unwrap()).unwrap(), None);
    assert_eq!(
        service.readings().list_readings(ReadingScope::All).unwrap(),
        vec![survivor]
    );
}

#[test]
fn destroying_a_course_removes_lessons_readings_and_assignments() {
    let conn = open_db_in_memory().unwrap();
    let service = CampusService::try_new(&conn).unwrap();
    let ruby = loose_course(&service, "RUB101", "Ruby");
    let rails = loose_course(&service, "RAI101", "Rails");
    let intro = lesson(&service, &ruby, "Intro");
    reading(&service, &intro, 1);
    assignment(&service, &ruby, "Homework");
    let kept_lesson = lesson(&service, &rails, "Routing");
    let kept_assignment = assignment(&service, &rails, "Homework");

    assert!(service.destroy_course(&ruby).unwrap());

    assert_eq!(service.courses().list_courses().unwrap(), vec![rails]);
    assert_eq!(service.lessons().list_lessons().unwrap(), vec![kept_lesson]);
    assert!(service
        .readings()
        .list_readings(ReadingScope::All)
        .unwrap()
        .is_empty());
    assert_eq!(
        service.assignments().list_assignments().unwrap(),
        vec![kept_assignment]
    );
}

#[test]
fn term_with_courses_cannot_be_destroyed() {
    let conn = open_db_in_memory().unwrap();
    let service = CampusService::try_new(&conn).unwrap();
    let education = school(&service, "Education");
    let fall = term(&service, &education, "Fall", "2016-03-09");
    course(&service, &fall, "RUB101", "Ruby");

    assert!(!service.destroy_term(&fall).unwrap());
    assert_eq!(service.terms().list_terms().unwrap(), vec![fall.clone()]);

    let err = service.terms().delete_term(fall.id.unwrap()).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Restricted {
            entity: "term",
            dependent: "courses",
            count: 1,
            ..
        }
    ));
}

#[test]
fn empty_term_can_be_destroyed() {
    let conn = open_db_in_memory().unwrap();
    let service = CampusService::try_new(&conn).unwrap();
    let education = school(&service, "Education");
    let fall = term(&service, &education, "Fall", "2016-03-09");

    assert!(service.destroy_term(&fall).unwrap());
    assert!(service.terms().list_terms().unwrap().is_empty());
}

#[test]
fn course_with_students_cannot_be_destroyed() {
    let conn = open_db_in_memory().unwrap();
    let service = CampusService::try_new(&conn).unwrap();
    let ruby = loose_course(&service, "RUB101", "Ruby");
    let intro = lesson(&service, &ruby, "Intro");
    let blake = user(&service, "Blake", "blake@awesome.com");
    let mut student = CourseStudent::new(blake.id.unwrap());
    assert!(service.enroll_student(&ruby, &mut student).unwrap());

    assert!(!service.destroy_course(&ruby).unwrap());

    assert_eq!(service.courses().list_courses().unwrap(), vec![ruby]);
    assert_eq!(service.lessons().list_lessons().unwrap(), vec![intro]);
}

#[test]
fn course_with_instructors_cannot_be_destroyed() {
    let conn = open_db_in_memory().unwrap();
    let service = CampusService::try_new(&conn).unwrap();
    let ruby = loose_course(&service, "RUB101", "Ruby");
    let jake = user(&service, "Jake", "jake@awesome.com");
    let mut instructor = CourseInstructor::new(jake.id.unwrap());
    assert!(service.assign_instructor(&ruby, &mut instructor).unwrap());

    assert!(!service.destroy_course(&ruby).unwrap());
    assert_eq!(service.courses().list_courses().unwrap(), vec![ruby.clone()]);

    assert!(service.destroy_course_instructor(&instructor).unwrap());
    assert!(service.destroy_course(&ruby).unwrap());
    assert!(service.courses().list_courses().unwrap().is_empty());
}

#[test]
fn destroying_an_assignment_clears_lesson_links() {
    let conn = open_db_in_memory().unwrap();
    let service = CampusService::try_new(&conn).unwrap();
    let ruby = loose_course(&service, "RUB101", "Ruby");
    let homework = assignment(&service, &ruby, "Homework");
    let mut intro = lesson(&service, &ruby, "Intro");
    assert!(service.set_pre_class_assignment(&mut intro, &homework).unwrap());
    assert!(service.set_in_class_assignment(&mut intro, &homework).unwrap());

    assert!(service.destroy_assignment(&homework).unwrap());

    let stored = service.lessons().get_lesson(intro.id.unwrap()).unwrap().unwrap();
    assert_eq!(stored.pre_class_assignment_id, None);
    assert_eq!(stored.in_class_assignment_id, None);
}

#[test]
fn school_with_terms_cannot_be_destroyed() {
    let conn = open_db_in_memory().unwrap();
    let service = CampusService::try_new(&conn).unwrap();
    let education = school(&service, "Education");
    let fall = term(&service, &education, "Fall", "2016-03-09");

    assert!(!service.destroy_school(&education).unwrap());
    assert_eq!(service.schools().list_schools().unwrap().len(), 1);

    assert!(service.destroy_term(&fall).unwrap());
    assert!(service.destroy_school(&education).unwrap());
    assert!(service.schools().list_schools().unwrap().is_empty());
}

#[test]
fn destroying_a_user_removes_their_roster_rows() {
    let conn = open_db_in_memory().unwrap();
    let service = CampusService::try_new(&conn).unwrap();
    let ruby = loose_course(&service, "RUB101", "Ruby");
    let blake = user(&service, "Blake", "blake@awesome.com");
    let mut student = CourseStudent::new(blake.id.unwrap());
    let mut instructor = CourseInstructor::new(blake.id.unwrap());
    assert!(service.enroll_student(&ruby, &mut student).unwrap());
    assert!(service.assign_instructor(&ruby, &mut instructor).unwrap());

    assert!(service.destroy_user(&blake).unwrap());

    assert!(service.users().list_users().unwrap().is_empty());
    assert!(service.rosters().list_course_students().unwrap().is_empty());
    assert!(service.rosters().list_course_instructors().unwrap().is_empty());
    assert!(service.destroy_course(&ruby).unwrap());
}

#[test]
fn destroying_a_missing_row_is_an_error() {
    let conn = open_db_in_memory().unwrap();
    let service = CampusService::try_new(&conn).unwrap();
    let ruby = loose_course(&service, "RUB101", "Ruby");
    let intro = lesson(&service, &ruby, "Intro");

    assert!(service.destroy_lesson(&intro).unwrap());
    let err = service.destroy_lesson(&intro).unwrap_err();
    assert!(matches!(err, RepoError::NotFound { entity: "lesson", .. }));
}
