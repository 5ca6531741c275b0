//! Fixture builders shared by the integration tests.
#![allow(dead_code)]

use campus_core::{
    Assignment, CampusService, Course, Lesson, Reading, School, Term, User,
};
use chrono::NaiveDate;

pub fn date(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
}

pub fn school(service: &CampusService<'_>, name: &str) -> School {
    let mut school = School::new(name);
    assert!(service.save_school(&mut school).unwrap());
    school
}

pub fn term(service: &CampusService<'_>, school: &School, name: &str, ends_on: &str) -> Term {
    let mut term = Term::new(name, date("2016-01-09"), date(ends_on), 0);
    assert!(service.append_term(school, &mut term).unwrap());
    term
}

pub fn course(service: &CampusService<'_>, term: &Term, code: &str, name: &str) -> Course {
    let mut course = Course::new(code, name);
    assert!(service.append_course(term, &mut course).unwrap());
    course
}

/// A course that is not scheduled into any term.
pub fn loose_course(service: &CampusService<'_>, code: &str, name: &str) -> Course {
    let mut course = Course::new(code, name);
    assert!(service.save_course(&mut course).unwrap());
    course
}

pub fn lesson(service: &CampusService<'_>, course: &Course, name: &str) -> Lesson {
    let mut lesson = Lesson::new(name);
    assert!(service.append_lesson(course, &mut lesson).unwrap());
    lesson
}

pub fn reading(service: &CampusService<'_>, lesson: &Lesson, order: i64) -> Reading {
    let mut reading = Reading::new(0, order, format!("https://www.ruby-docs.org/{order}"));
    assert!(service.append_reading(lesson, &mut reading).unwrap());
    reading
}

pub fn assignment(service: &CampusService<'_>, course: &Course, name: &str) -> Assignment {
    let mut assignment = Assignment::new(0, name, 10.0);
    assert!(service.append_assignment(course, &mut assignment).unwrap());
    assignment
}

pub fn user(service: &CampusService<'_>, first_name: &str, email: &str) -> User {
    let mut user = User::new(first_name, "Strickland", email);
    assert!(service.save_user(&mut user).unwrap());
    user
}
