mod common;

use campus_core::db::open_db_in_memory;
use campus_core::{
    CampusService, CourseInstructor, CourseRepository, CourseStudent, LessonRepository,
    ReadingScope, Record, School, SchoolRepository, Term, TermRepository,
};
use common::{assignment, course, date, lesson, loose_course, reading, school, term, user};

#[test]
fn school_terms_list_in_append_order() {
    let conn = open_db_in_memory().unwrap();
    let service = CampusService::try_new(&conn).unwrap();
    let education = school(&service, "Education");

    let mut fall = Term::new("Fall", date("2016-01-09"), date("2016-03-09"), 0);
    let mut spring = Term::new("Spring", date("2016-01-09"), date("2016-03-09"), 0);
    assert!(service.append_term(&education, &mut fall).unwrap());
    assert!(service.append_term(&education, &mut spring).unwrap());

    let terms = service
        .terms()
        .list_terms_for_school(education.id.unwrap())
        .unwrap();
    assert_eq!(terms, vec![fall, spring]);
}

#[test]
fn appending_to_an_unsaved_owner_is_an_error() {
    let conn = open_db_in_memory().unwrap();
    let service = CampusService::try_new(&conn).unwrap();

    let mut term = Term::new("Fall", date("2016-01-09"), date("2016-03-09"), 0);
    let err = service
        .append_term(&School::new("Education"), &mut term)
        .unwrap_err();
    assert!(matches!(err, campus_core::RepoError::Unsaved("school")));
    assert!(!term.is_persisted());
}

#[test]
fn term_courses_and_school_courses_through_terms() {
    let conn = open_db_in_memory().unwrap();
    let service = CampusService::try_new(&conn).unwrap();
    let education = school(&service, "Education");
    let other = school(&service, "Engineering");
    let fall = term(&service, &education, "Fall", "2016-03-09");
    let spring = term(&service, &education, "Spring", "2016-06-09");
    let elsewhere = term(&service, &other, "Fall", "2016-03-09");

    let ruby = course(&service, &fall, "RUB101", "Ruby");
    let rails = course(&service, &spring, "RAI201", "Rails");
    course(&service, &elsewhere, "CIV101", "Bridges");
    loose_course(&service, "ART101", "Drawing");

    assert_eq!(
        service.terms().list_term_courses(fall.id.unwrap()).unwrap(),
        vec![ruby.clone()]
    );

    // Courses follow their term's order: spring ends later, so it comes first.
    let school_courses = service
        .schools()
        .list_school_courses(education.id.unwrap())
        .unwrap();
    assert_eq!(school_courses, vec![rails, ruby]);
}

#[test]
fn term_reports_school_name_or_none() {
    let conn = open_db_in_memory().unwrap();
    let service = CampusService::try_new(&conn).unwrap();
    let education = school(&service, "Education");
    let fall = term(&service, &education, "Fall", "2016-03-09");

    assert_eq!(
        service.terms().school_name(fall.id.unwrap()).unwrap(),
        "Education"
    );
    assert_eq!(service.terms().school_name(999).unwrap(), "None");
}

#[test]
fn course_readings_through_lessons() {
    let conn = open_db_in_memory().unwrap();
    let service = CampusService::try_new(&conn).unwrap();
    let ruby = loose_course(&service, "RUB101", "Ruby");
    let rails = loose_course(&service, "RAI101", "Rails");
    let intro = lesson(&service, &ruby, "Intro");
    let blocks = lesson(&service, &ruby, "Blocks");
    let routing = lesson(&service, &rails, "Routing");

    let third = reading(&service, &intro, 3);
    let first = reading(&service, &blocks, 1);
    let second = reading(&service, &intro, 2);
    reading(&service, &routing, 1);

    assert_eq!(
        service.courses().list_course_lessons(ruby.id.unwrap()).unwrap(),
        vec![intro, blocks]
    );
    assert_eq!(
        service.courses().list_course_readings(ruby.id.unwrap()).unwrap(),
        vec![first, second, third]
    );
}

#[test]
fn course_rosters_list_students_and_instructors() {
    let conn = open_db_in_memory().unwrap();
    let service = CampusService::try_new(&conn).unwrap();
    let ruby = loose_course(&service, "RUB101", "Ruby");
    let blake = user(&service, "Blake", "blake@awesome.com");
    let jake = user(&service, "Jake", "jake@awesome.com");

    let mut student = CourseStudent::new(blake.id.unwrap());
    let mut instructor = CourseInstructor::new(jake.id.unwrap());
    assert!(service.enroll_student(&ruby, &mut student).unwrap());
    assert!(service.assign_instructor(&ruby, &mut instructor).unwrap());

    let course_id = ruby.id.unwrap();
    assert_eq!(
        service.courses().list_course_students(course_id).unwrap(),
        vec![student]
    );
    assert_eq!(
        service.courses().list_course_instructors(course_id).unwrap(),
        vec![instructor]
    );
}

#[test]
fn lessons_are_found_by_pre_and_in_class_assignment() {
    let conn = open_db_in_memory().unwrap();
    let service = CampusService::try_new(&conn).unwrap();
    let ruby = loose_course(&service, "RUB101", "Ruby");
    let homework = assignment(&service, &ruby, "Homework");
    let lab = assignment(&service, &ruby, "Lab");
    let mut intro = lesson(&service, &ruby, "Intro");
    let mut blocks = lesson(&service, &ruby, "Blocks");

    assert!(service.set_pre_class_assignment(&mut intro, &homework).unwrap());
    assert!(service.set_in_class_assignment(&mut intro, &lab).unwrap());
    assert!(service.set_pre_class_assignment(&mut blocks, &homework).unwrap());

    let lessons = service.lessons();
    assert_eq!(
        lessons
            .list_lessons_with_pre_class_assignment(homework.id.unwrap())
            .unwrap(),
        vec![intro.clone(), blocks]
    );
    assert_eq!(
        lessons
            .list_lessons_with_in_class_assignment(lab.id.unwrap())
            .unwrap(),
        vec![intro]
    );
    assert_eq!(
        service.courses().list_course_assignments(ruby.id.unwrap()).unwrap(),
        vec![homework, lab]
    );
}

#[test]
fn lesson_readings_respect_pre_and_post_scopes() {
    let conn = open_db_in_memory().unwrap();
    let service = CampusService::try_new(&conn).unwrap();
    let ruby = loose_course(&service, "RUB101", "Ruby");
    let intro = lesson(&service, &ruby, "Intro");
    let other = lesson(&service, &ruby, "Blocks");

    let mut before = campus_core::Reading::new(0, 2, "https://www.ruby-docs.org").before_lesson();
    assert!(service.append_reading(&intro, &mut before).unwrap());
    let after = reading(&service, &intro, 1);
    reading(&service, &other, 1);

    let lesson_id = intro.id.unwrap();
    let lessons = service.lessons();
    assert_eq!(
        lessons.list_lesson_readings(lesson_id, ReadingScope::All).unwrap(),
        vec![after.clone(), before.clone()]
    );
    assert_eq!(
        lessons.list_lesson_readings(lesson_id, ReadingScope::Pre).unwrap(),
        vec![before]
    );
    assert_eq!(
        lessons.list_lesson_readings(lesson_id, ReadingScope::Post).unwrap(),
        vec![after]
    );
}

#[test]
fn duplicated_reading_saves_as_a_new_row() {
    let conn = open_db_in_memory().unwrap();
    let service = CampusService::try_new(&conn).unwrap();
    let ruby = loose_course(&service, "RUB101", "Ruby");
    let intro = lesson(&service, &ruby, "Intro");
    let original = reading(&service, &intro, 1);

    let mut copy = original.duplicate();
    assert_eq!(copy.id, None);
    assert!(service.save_reading(&mut copy).unwrap());

    assert_ne!(copy.id, original.id);
    assert_eq!(copy.url, original.url);
    assert_eq!(
        service
            .lessons()
            .list_lesson_readings(intro.id.unwrap(), ReadingScope::All)
            .unwrap()
            .len(),
        2
    );
}
