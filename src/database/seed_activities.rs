use crate::models::Activity;

/// Activities the directory starts with, in listing order.
pub fn seed_activities() -> Vec<(String, Activity)> {
    vec![
        (
            "Chess Club".to_string(),
            Activity::new(
                "Learn strategies and compete in chess tournaments",
                "Fridays, 3:30 PM - 5:00 PM",
                12,
                &["michael@mergington.edu", "daniel@mergington.edu"],
            ),
        ),
        (
            "Programming Class".to_string(),
            Activity::new(
                "Learn programming fundamentals and build software projects",
                "Tuesdays and Thursdays, 3:30 PM - 4:30 PM",
                20,
                &["emma@mergington.edu", "sophia@mergington.edu"],
            ),
        ),
        (
            "Gym Class".to_string(),
            Activity::new(
                "Physical education and sports activities",
                "Mondays, Wednesdays, Fridays, 2:00 PM - 3:00 PM",
                30,
                &["john@mergington.edu", "olivia@mergington.edu"],
            ),
        ),
        (
            "Basketball Team".to_string(),
            Activity::new(
                "Competitive basketball training and inter-school games",
                "Mondays and Wednesdays, 4:00 PM - 6:00 PM",
                15,
                &["alex@mergington.edu"],
            ),
        ),
        (
            "Soccer Club".to_string(),
            Activity::new(
                "Outdoor soccer practice and weekend matches",
                "Tuesdays and Saturdays, 3:00 PM - 5:00 PM",
                22,
                &["lucas@mergington.edu", "mia@mergington.edu"],
            ),
        ),
        (
            "Art Club".to_string(),
            Activity::new(
                "Explore painting, drawing and sculpture",
                "Thursdays, 3:30 PM - 5:00 PM",
                15,
                &["amelia@mergington.edu"],
            ),
        ),
        (
            "Drama Club".to_string(),
            Activity::new(
                "Acting workshops and the annual school play",
                "Wednesdays, 4:00 PM - 6:00 PM",
                25,
                &["ella@mergington.edu", "james@mergington.edu"],
            ),
        ),
        (
            "Math Club".to_string(),
            Activity::new(
                "Problem solving and preparation for math olympiads",
                "Tuesdays, 3:30 PM - 4:30 PM",
                10,
                &["liam@mergington.edu"],
            ),
        ),
        (
            "Debate Team".to_string(),
            Activity::new(
                "Practice public speaking and compete in debate tournaments",
                "Fridays, 4:00 PM - 5:30 PM",
                12,
                &["charlotte@mergington.edu", "henry@mergington.edu"],
            ),
        ),
    ]
}
