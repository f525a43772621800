//! The built-in catalog a fresh install starts from.

use std::collections::HashMap;

use crate::domain::{Chapter, Course, Lesson, Resource, TranscriptCue};

const VIDEO_URL: &str = "/video.mp4";

fn lesson(
    id: &str,
    title: &str,
    description: &str,
    instructor: &str,
    duration_sec: u32,
    transcript: Vec<TranscriptCue>,
) -> Lesson {
    Lesson {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        instructor: instructor.to_string(),
        duration_sec,
        url: VIDEO_URL.to_string(),
        transcript: Some(transcript),
        locked: false,
        completed: false,
    }
}

fn locked(mut lesson: Lesson) -> Lesson {
    lesson.locked = true;
    lesson
}

fn cue(id: &str, start_time: f64, end_time: f64, text: &str) -> TranscriptCue {
    TranscriptCue {
        id: id.to_string(),
        start_time,
        end_time,
        text: text.to_string(),
    }
}

fn chapters(lesson_id: &str, marks: &[(&str, f64)]) -> (String, Vec<Chapter>) {
    let chapters = marks
        .iter()
        .map(|&(label, at_sec)| Chapter {
            label: label.to_string(),
            at_sec,
        })
        .collect();
    (lesson_id.to_string(), chapters)
}

fn resource(id: &str, name: &str, kind: &str, url: &str, size: &str) -> Resource {
    Resource {
        id: id.to_string(),
        name: name.to_string(),
        kind: kind.to_string(),
        url: url.to_string(),
        size: Some(size.to_string()),
    }
}

fn breadcrumb(parts: &[&str]) -> Option<Vec<String>> {
    Some(parts.iter().map(|part| part.to_string()).collect())
}

pub fn seed_courses() -> Vec<Course> {
    vec![
        react_fundamentals(),
        advanced_javascript(),
        node_backend(),
        python_data_science(),
    ]
}

fn react_fundamentals() -> Course {
    Course {
        id: "course-1".to_string(),
        title: "React Fundamentals".to_string(),
        description: "Master the fundamentals of React development and build dynamic user interfaces with confidence.".to_string(),
        instructor: "Sarah Johnson".to_string(),
        breadcrumb: breadcrumb(&["Web Development", "Frontend", "React"]),
        resources: vec![
            resource(
                "res-1-1",
                "React Official Documentation",
                "pdf",
                "/resources/react-docs.pdf",
                "3.2 MB",
            ),
            resource(
                "res-1-2",
                "Component Examples & Code Samples",
                "zip",
                "/resources/react-examples.zip",
                "1.8 MB",
            ),
            resource(
                "res-1-3",
                "React Cheat Sheet",
                "doc",
                "/resources/react-cheatsheet.pdf",
                "850 KB",
            ),
        ],
        lessons: vec![
            lesson(
                "lesson-1-1",
                "Introduction to React",
                "Learn the fundamentals of React, understand its core concepts, and discover why it's one of the most popular JavaScript libraries for building user interfaces.",
                "Sarah Johnson",
                480,
                vec![
                    cue("t1-1", 0.0, 15.0, "Welcome to this comprehensive React tutorial..."),
                    cue(
                        "t1-2",
                        15.0,
                        35.0,
                        "React is a JavaScript library for building user interfaces...",
                    ),
                    cue(
                        "t1-3",
                        35.0,
                        55.0,
                        "One of the key concepts in React is the component-based architecture...",
                    ),
                ],
            ),
            lesson(
                "lesson-1-2",
                "Components and JSX",
                "Dive deep into React components and JSX syntax...",
                "Sarah Johnson",
                720,
                vec![
                    cue(
                        "t2-1",
                        0.0,
                        20.0,
                        "In this lesson, we'll explore React components and JSX syntax in detail...",
                    ),
                    cue("t2-2", 20.0, 40.0, "JSX is a syntax extension for JavaScript..."),
                ],
            ),
            lesson(
                "lesson-1-3",
                "Props and State",
                "Master data management in React by learning about props and state...",
                "Mike Chen",
                600,
                vec![
                    cue("t3-1", 0.0, 25.0, "Props and state are fundamental concepts in React..."),
                    cue(
                        "t3-2",
                        25.0,
                        45.0,
                        "Understanding when to use props versus state is crucial...",
                    ),
                ],
            ),
            lesson(
                "lesson-1-4",
                "Event Handling",
                "Learn how to handle user interactions in React applications...",
                "Sarah Johnson",
                540,
                vec![
                    cue(
                        "t4-1",
                        0.0,
                        20.0,
                        "Event handling in React is similar to handling events in vanilla JS...",
                    ),
                    cue(
                        "t4-2",
                        20.0,
                        40.0,
                        "React uses SyntheticEvents to ensure consistent behavior...",
                    ),
                ],
            ),
        ],
        chapters_by_lesson_id: HashMap::from([
            chapters(
                "lesson-1-1",
                &[
                    ("What is React?", 0.0),
                    ("React vs Other Frameworks", 120.0),
                    ("Setting up React", 300.0),
                ],
            ),
            chapters("lesson-1-2", &[("Components Overview", 0.0), ("JSX Syntax", 180.0)]),
            chapters("lesson-1-3", &[("Understanding Props", 0.0), ("Understanding State", 200.0)]),
            chapters("lesson-1-4", &[("Event Handling Basics", 0.0), ("SyntheticEvents", 150.0)]),
        ]),
    }
}

fn advanced_javascript() -> Course {
    Course {
        id: "course-2".to_string(),
        title: "Advanced JavaScript".to_string(),
        description: "Master advanced JavaScript concepts and modern ES6+ features.".to_string(),
        instructor: "Alex Rodriguez".to_string(),
        breadcrumb: breadcrumb(&["Web Development", "JavaScript"]),
        resources: vec![
            resource("res-2-1", "ES6+ Features Guide", "pdf", "/resources/es6-guide.pdf", "2.1 MB"),
            resource(
                "res-2-2",
                "JavaScript Best Practices",
                "doc",
                "/resources/js-best-practices.docx",
                "1.5 MB",
            ),
        ],
        lessons: vec![
            lesson(
                "lesson-2-1",
                "Closures and Scope",
                "Deep dive into JavaScript closures...",
                "Alex Rodriguez",
                900,
                vec![
                    cue(
                        "t5-1",
                        0.0,
                        30.0,
                        "Closures are one of the most powerful features in JavaScript...",
                    ),
                    cue(
                        "t5-2",
                        30.0,
                        60.0,
                        "Understanding scope and how it relates to closures...",
                    ),
                ],
            ),
            lesson(
                "lesson-2-2",
                "Promises and Async/Await",
                "Master asynchronous JavaScript programming...",
                "Emily Davis",
                1080,
                vec![
                    cue("t6-1", 0.0, 25.0, "Asynchronous programming is crucial in JavaScript..."),
                    cue("t6-2", 25.0, 50.0, "Then we'll explore the async/await syntax..."),
                ],
            ),
            locked(lesson(
                "lesson-2-3",
                "ES6+ Features",
                "Explore modern JavaScript features...",
                "Alex Rodriguez",
                960,
                vec![
                    cue(
                        "t7-1",
                        0.0,
                        30.0,
                        "ES6 and later versions have introduced many powerful features...",
                    ),
                    cue(
                        "t7-2",
                        30.0,
                        60.0,
                        "These modern features make JavaScript code more concise...",
                    ),
                ],
            )),
        ],
        chapters_by_lesson_id: HashMap::from([
            chapters(
                "lesson-2-1",
                &[
                    ("Understanding Closures", 0.0),
                    ("Lexical Scoping", 240.0),
                    ("Practical Examples", 540.0),
                ],
            ),
            chapters("lesson-2-2", &[("Promises Overview", 0.0), ("Async/Await Syntax", 300.0)]),
            chapters(
                "lesson-2-3",
                &[("Arrow Functions", 0.0), ("Destructuring & Template Literals", 300.0)],
            ),
        ]),
    }
}

fn node_backend() -> Course {
    Course {
        id: "course-3".to_string(),
        title: "Node.js Backend Development".to_string(),
        description: "Learn to build scalable backend applications with Node.js and Express.".to_string(),
        instructor: "David Kim".to_string(),
        breadcrumb: breadcrumb(&["Web Development", "Backend", "Node.js"]),
        resources: vec![
            resource(
                "res-3-1",
                "Node.js API Reference",
                "pdf",
                "/resources/nodejs-api.pdf",
                "4.7 MB",
            ),
            resource(
                "res-3-2",
                "Express.js Starter Template",
                "zip",
                "/resources/express-template.zip",
                "2.3 MB",
            ),
            resource(
                "res-3-3",
                "Database Connection Examples",
                "zip",
                "/resources/db-examples.zip",
                "1.9 MB",
            ),
        ],
        lessons: vec![
            lesson(
                "lesson-3-1",
                "Introduction to Node.js",
                "Get started with Node.js runtime environment...",
                "David Kim",
                660,
                vec![
                    cue("t8-1", 0.0, 30.0, "Node.js is a runtime environment..."),
                    cue(
                        "t8-2",
                        30.0,
                        60.0,
                        "The event loop and non-blocking I/O are fundamental...",
                    ),
                ],
            ),
            lesson(
                "lesson-3-2",
                "Express.js Fundamentals",
                "Build web applications and APIs with Express.js framework...",
                "David Kim",
                840,
                vec![
                    cue(
                        "t9-1",
                        0.0,
                        25.0,
                        "Express.js is a minimal and flexible Node.js web application framework...",
                    ),
                    cue(
                        "t9-2",
                        25.0,
                        50.0,
                        "Middleware functions are crucial in Express.js applications...",
                    ),
                ],
            ),
            locked(lesson(
                "lesson-3-3",
                "Working with Databases",
                "Integrate databases with Node.js applications...",
                "Maria Lopez",
                1200,
                vec![
                    cue(
                        "t10-1",
                        0.0,
                        30.0,
                        "Database integration is essential for most web applications...",
                    ),
                    cue("t10-2", 30.0, 60.0, "ORMs simplify database operations..."),
                ],
            )),
            locked(lesson(
                "lesson-3-4",
                "Authentication & Security",
                "Implement secure authentication and authorization in Node.js applications...",
                "David Kim",
                1020,
                vec![
                    cue("t11-1", 0.0, 30.0, "Security is crucial in web applications..."),
                    cue("t11-2", 30.0, 60.0, "JSON Web Tokens (JWT) provide a secure way..."),
                ],
            )),
        ],
        chapters_by_lesson_id: HashMap::from([
            chapters(
                "lesson-3-1",
                &[
                    ("What is Node.js?", 0.0),
                    ("Installing Node.js", 180.0),
                    ("First Node.js App", 420.0),
                ],
            ),
            chapters("lesson-3-2", &[("Routing Basics", 0.0), ("Middleware Functions", 300.0)]),
            chapters(
                "lesson-3-3",
                &[("SQL & NoSQL Databases", 0.0), ("ORMs & Connection Pooling", 600.0)],
            ),
            chapters(
                "lesson-3-4",
                &[("Authentication Overview", 0.0), ("Security Best Practices", 510.0)],
            ),
        ]),
    }
}

fn python_data_science() -> Course {
    Course {
        id: "course-4".to_string(),
        title: "Python for Data Science".to_string(),
        description: "Master Python programming for data analysis and machine learning.".to_string(),
        instructor: "Dr. Lisa Wang".to_string(),
        breadcrumb: breadcrumb(&["Programming", "Python", "Data Science"]),
        resources: vec![
            resource(
                "res-4-1",
                "Python Data Science Handbook",
                "pdf",
                "/resources/python-ds-handbook.pdf",
                "5.8 MB",
            ),
            resource(
                "res-4-2",
                "Sample Datasets",
                "zip",
                "/resources/sample-datasets.zip",
                "12.3 MB",
            ),
            resource(
                "res-4-3",
                "Jupyter Notebook Templates",
                "zip",
                "/resources/jupyter-templates.zip",
                "3.4 MB",
            ),
        ],
        lessons: vec![
            lesson(
                "lesson-4-1",
                "Python Basics for Data Science",
                "...",
                "Dr. Lisa Wang",
                780,
                Vec::new(),
            ),
            lesson("lesson-4-2", "NumPy and Pandas", "...", "Dr. Lisa Wang", 960, Vec::new()),
            lesson(
                "lesson-4-3",
                "Data Visualization with Matplotlib",
                "...",
                "Tom Wilson",
                720,
                Vec::new(),
            ),
            locked(lesson(
                "lesson-4-4",
                "Introduction to Machine Learning",
                "...",
                "Dr. Lisa Wang",
                1080,
                Vec::new(),
            )),
            locked(lesson(
                "lesson-4-5",
                "Building Your First ML Model",
                "...",
                "Tom Wilson",
                900,
                Vec::new(),
            )),
        ],
        chapters_by_lesson_id: HashMap::from([
            chapters(
                "lesson-4-1",
                &[
                    ("Why Python for Data Science?", 0.0),
                    ("Essential Libraries Overview", 180.0),
                    ("Setting up Environment", 420.0),
                ],
            ),
            chapters(
                "lesson-4-2",
                &[("NumPy Arrays", 0.0), ("Pandas DataFrames", 240.0), ("Data Cleaning", 480.0)],
            ),
            chapters("lesson-4-3", &[("Matplotlib Basics", 0.0), ("Plot Types", 200.0)]),
            chapters(
                "lesson-4-4",
                &[("Supervised vs Unsupervised", 0.0), ("Model Training", 300.0)],
            ),
            chapters("lesson-4-5", &[("Data Preparation", 0.0), ("Model Deployment", 450.0)]),
        ]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_lesson_has_chapters() {
        for course in seed_courses() {
            for lesson in &course.lessons {
                assert!(
                    !course.chapters_for(&lesson.id).is_empty(),
                    "{} has no chapters",
                    lesson.id
                );
            }
        }
    }

    #[test]
    fn first_lesson_of_every_course_is_open() {
        for course in seed_courses() {
            assert!(!course.lessons[0].locked, "{} starts locked", course.id);
        }
    }
}
