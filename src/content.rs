//! Compiled-in site copy
//!
//! Marketing text that is not managed through the admin panel: hero,
//! services, results, careers and office locations.

use serde::Serialize;

pub const COMPANY_EMAIL: &str = "info@galined.com";
pub const LOGO_URL: &str =
    "https://res.cloudinary.com/davwtxoeo/image/upload/v1747795724/Galin-Small-Color_cjcsvu.png";

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Hero {
    pub title: &'static str,
    pub highlight: &'static str,
    pub body: &'static str,
    pub primary_cta: &'static str,
    pub secondary_cta: &'static str,
    pub image_url: &'static str,
}

pub const HERO: Hero = Hero {
    title: "Unlock Your",
    highlight: "Academic Potential",
    body: "Personalized educational services designed to help students excel academically and prepare for their future. Our expert educators provide the guidance you need to succeed.",
    primary_cta: "Schedule Free Consultation",
    secondary_cta: "Explore Services",
    image_url: "https://res.cloudinary.com/davwtxoeo/image/upload/v1747796981/180407_GalinEducation_00981_ci8s6n.jpg",
};

/// A service line with its own detail page
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ServiceInfo {
    pub slug: &'static str,
    pub name: &'static str,
    pub summary: &'static str,
    pub highlights: &'static [&'static str],
}

pub const SERVICES: [ServiceInfo; 5] = [
    ServiceInfo {
        slug: "college-counseling",
        name: "College Counseling",
        summary: "One-on-one guidance through every step of the college search and application process, from building a balanced list to submitting the final application.",
        highlights: &[
            "Personalized college list development",
            "Essay brainstorming and revision",
            "Application strategy and timelines",
            "Interview preparation",
        ],
    },
    ServiceInfo {
        slug: "graduate-admissions",
        name: "Graduate Admissions",
        summary: "Support for applicants to graduate and professional programs, with a focus on statements of purpose, program selection and interviews.",
        highlights: &[
            "Program research and selection",
            "Statement of purpose coaching",
            "Resume and CV review",
            "Mock interviews",
        ],
    },
    ServiceInfo {
        slug: "test-prep",
        name: "Test Prep",
        summary: "Targeted SAT and ACT preparation built around diagnostic testing and a study plan matched to each student's goals.",
        highlights: &[
            "Diagnostic practice tests",
            "Individual and small-group sessions",
            "Pacing and question strategy",
            "Score tracking",
        ],
    },
    ServiceInfo {
        slug: "executive-functioning",
        name: "Executive Functioning Coaching",
        summary: "Coaching that builds the organization, planning and time-management habits students need to manage a demanding course load.",
        highlights: &[
            "Weekly planning routines",
            "Study systems that stick",
            "Breaking down long-term projects",
            "Accountability check-ins",
        ],
    },
    ServiceInfo {
        slug: "tutoring",
        name: "Tutoring",
        summary: "Subject tutoring from experienced educators in math, science, writing and more, from elementary school through AP coursework.",
        highlights: &[
            "Math and science through AP level",
            "Writing and reading comprehension",
            "Homework support",
            "Exam review",
        ],
    },
];

pub fn find_service(slug: &str) -> Option<&'static ServiceInfo> {
    SERVICES.iter().find(|s| s.slug == slug)
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Testimonial {
    pub quote: &'static str,
    pub author: &'static str,
    pub school: &'static str,
}

pub const TESTIMONIALS: [Testimonial; 4] = [
    Testimonial {
        quote: "The college counseling services at Galin Education were instrumental in helping me get accepted to my dream school. The personalized attention and expert guidance made all the difference.",
        author: "Sarah J.",
        school: "Harvard University '24",
    },
    Testimonial {
        quote: "Thanks to Galin's test prep program, I improved my SAT score by 200 points. The strategies and practice materials were exactly what I needed.",
        author: "Michael C.",
        school: "Stanford University '25",
    },
    Testimonial {
        quote: "Working with Galin Education transformed my college application journey. Their guidance was invaluable.",
        author: "Emma L.",
        school: "Yale University '23",
    },
    Testimonial {
        quote: "The tutoring services helped me excel in my AP classes. I couldn't have done it without their support.",
        author: "David R.",
        school: "Princeton University '24",
    },
];

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Stat {
    pub heading: &'static str,
    pub value: &'static str,
    pub caption: &'static str,
}

pub const STATS: [Stat; 3] = [
    Stat {
        heading: "Student Success",
        value: "95%",
        caption: "Program completion rate",
    },
    Stat {
        heading: "College Acceptance",
        value: "89%",
        caption: "Students accepted to top universities",
    },
    Stat {
        heading: "Scholarship Awards",
        value: "$2.5M+",
        caption: "Total scholarships awarded",
    },
];

#[derive(Debug, Clone, Copy, Serialize)]
pub struct SuccessStory {
    pub name: &'static str,
    pub title: &'static str,
    pub image_url: &'static str,
    pub preview: &'static str,
    pub full_story: &'static str,
    pub class_of: &'static str,
}

impl SuccessStory {
    /// Full story split on blank lines
    pub fn paragraphs(&self) -> Vec<&'static str> {
        self.full_story
            .split("\n\n")
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect()
    }
}

pub const SUCCESS_STORIES: [SuccessStory; 2] = [
    SuccessStory {
        name: "Emily Chen",
        title: "Emily's Journey to Yale",
        image_url: "https://images.pexels.com/photos/1462630/pexels-photo-1462630.jpeg?auto=compress&cs=tinysrgb&h=400&w=600&fit=crop",
        preview: "Emily worked with our college counselors for two years, developing a strong academic profile and crafting compelling applications. Her hard work paid off with acceptance to Yale University.",
        full_story: "Emily came to Galin Education as a sophomore with dreams of attending an Ivy League university. Through dedicated work with our college counselors, she developed a strategic academic plan that included challenging coursework and meaningful extracurricular activities.\n\nOur counselors helped Emily identify her passion for environmental science and guided her in creating a research project that earned state-wide recognition. With support from our test prep team, she achieved a 1580 on her SAT.\n\nEmily's college essays, refined through multiple drafts with her counselor, beautifully captured her intellectual curiosity and commitment to environmental advocacy. Her acceptance to Yale's Class of 2023 was a testament to her hard work and the comprehensive support provided by the Galin team.",
        class_of: "Class of 2023",
    },
    SuccessStory {
        name: "David Martinez",
        title: "David's Academic Transformation",
        image_url: "https://images.pexels.com/photos/1181695/pexels-photo-1181695.jpeg?auto=compress&cs=tinysrgb&h=400&w=600&fit=crop&top=30",
        preview: "Through executive functioning coaching and subject tutoring, David improved his GPA from 2.8 to 3.9 and gained acceptance to his top-choice engineering program.",
        full_story: "David's journey with Galin Education began during his junior year when he was struggling to balance his challenging course load with his passion for robotics. Our executive functioning coach worked with David to develop personalized organization systems and study strategies that transformed his academic performance.\n\nThrough targeted tutoring in AP Physics and Calculus, David not only improved his grades but developed a deeper understanding of these subjects that enhanced his robotics projects. His GPA rose from 2.8 to 3.9, and his improved time management skills allowed him to take on leadership roles in his school's robotics club.\n\nDavid's newfound academic confidence and demonstrated leadership abilities helped him secure acceptance to his dream engineering program. Today, he continues to excel in his studies while mentoring other students in robotics competitions.",
        class_of: "Class of 2024",
    },
];

#[derive(Debug, Clone, Copy, Serialize)]
pub struct JobOpening {
    pub title: &'static str,
    pub kind: &'static str,
    pub location: &'static str,
    pub description: &'static str,
}

impl JobOpening {
    /// Pre-filled application email link
    pub fn mailto(&self) -> String {
        let subject = format!("Application for {} Position", self.title);
        let body = format!(
            "I am interested in the {} position in {}.",
            self.title, self.location
        );
        format!(
            "mailto:{}?subject={}&body={}",
            COMPANY_EMAIL,
            urlencoding::encode(&subject),
            urlencoding::encode(&body)
        )
    }
}

pub const JOB_OPENINGS: [JobOpening; 3] = [
    JobOpening {
        title: "College Counselor",
        kind: "Full-time",
        location: "Madison, WI",
        description: "Seeking experienced college counselor to guide students through the college admissions process.",
    },
    JobOpening {
        title: "Test Prep Instructor",
        kind: "Part-time",
        location: "Milwaukee, WI",
        description: "Looking for dedicated SAT/ACT prep instructors to help students achieve their target scores.",
    },
    JobOpening {
        title: "Executive Function Coach",
        kind: "Full-time",
        location: "San Francisco, CA",
        description: "Join our team helping students develop crucial organizational and study skills.",
    },
];

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Office {
    pub name: &'static str,
    pub address: &'static str,
    pub phone: &'static str,
    pub email: &'static str,
}

pub const OFFICES: [Office; 3] = [
    Office {
        name: "Madison",
        address: "5102 Silvertree Run, Madison, WI 53705",
        phone: "(608) 841-1053",
        email: COMPANY_EMAIL,
    },
    Office {
        name: "Milwaukee",
        address: "10555 North Port Washington Road, Mequon, WI 53092",
        phone: "(608) 841-1053",
        email: COMPANY_EMAIL,
    },
    Office {
        name: "San Francisco",
        address: "1328 4th St., San Rafael, CA 94901",
        phone: "(415) 846-6243",
        email: COMPANY_EMAIL,
    },
];
