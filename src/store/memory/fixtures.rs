//! Fixed sample datasets substituted when the hosted store is unavailable.

use chrono::{DateTime, Duration, Utc};

use crate::store::{Contact, HousingType, Job, JobType, MatchProfile, SeniorLiving};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// The five sample job postings, `posted_date` relative to `anchor`.
pub fn fixture_jobs(anchor: DateTime<Utc>) -> Vec<Job> {
    vec![
        Job {
            id: "1".to_string(),
            title: "Customer Support Executive".to_string(),
            company: "TechVision India".to_string(),
            location: "Bangalore, Karnataka".to_string(),
            job_type: JobType::FullTime,
            salary: "₹25,000 - ₹35,000/month".to_string(),
            posted_date: anchor - Duration::days(2),
            logo: "https://images.unsplash.com/photo-1568992687947-868a62a9f521?w=64&h=64&auto=format&fit=crop".to_string(),
            description: "TechVision India is looking for a Customer Support Executive to help our clients with technical issues. This position is suitable for candidates with hearing impairment as we provide assistive technology.".to_string(),
            requirements: strings(&["Good communication skills", "Basic computer knowledge", "Customer service orientation"]),
            benefits: strings(&["Health insurance", "Transportation allowance", "Skill development programs"]),
            accessibility: strings(&["Sign language interpreters", "Assistive listening devices", "Flexible work hours"]),
            featured: true,
            application_url: "https://techvisionindia.com/careers/customer-support".to_string(),
        },
        Job {
            id: "2".to_string(),
            title: "Content Writer".to_string(),
            company: "Digital Media Solutions".to_string(),
            location: "Remote (India)".to_string(),
            job_type: JobType::PartTime,
            salary: "₹15,000 - ₹25,000/month".to_string(),
            posted_date: anchor - Duration::days(5),
            logo: "https://images.unsplash.com/photo-1560472355-536de3962603?w=64&h=64&auto=format&fit=crop".to_string(),
            description: "Create engaging content for our blog and social media channels. This remote position is ideal for persons with mobility challenges.".to_string(),
            requirements: strings(&["Excellent writing skills in English and Hindi", "Knowledge of SEO", "Creative mindset"]),
            benefits: strings(&["Work from home", "Flexible hours", "Performance bonuses"]),
            accessibility: strings(&["Remote work", "Accessible digital tools", "Flexible deadlines"]),
            featured: false,
            application_url: "https://digitalmediasolutions.in/careers/content-writer".to_string(),
        },
        Job {
            id: "3".to_string(),
            title: "Accounts Assistant".to_string(),
            company: "Nirman Constructions".to_string(),
            location: "Mumbai, Maharashtra".to_string(),
            job_type: JobType::FullTime,
            salary: "₹20,000 - ₹30,000/month".to_string(),
            posted_date: anchor - Duration::days(7),
            logo: "https://images.unsplash.com/photo-1486406146926-c627a92ad1ab?w=64&h=64&auto=format&fit=crop".to_string(),
            description: "Assist in managing accounts and financial records. Our office provides a wheelchair-accessible environment with appropriate accommodations.".to_string(),
            requirements: strings(&["Knowledge of basic accounting", "Proficiency in MS Excel", "Attention to detail"]),
            benefits: strings(&["Provident Fund", "Medical insurance", "Travel allowance"]),
            accessibility: strings(&["Wheelchair accessible workplace", "Adjustable desks", "Screen reader software"]),
            featured: false,
            application_url: "https://nirmanconstructions.co.in/join-us/accounts-assistant".to_string(),
        },
        Job {
            id: "4".to_string(),
            title: "Software Developer".to_string(),
            company: "Infotech Solutions".to_string(),
            location: "Hyderabad, Telangana".to_string(),
            job_type: JobType::FullTime,
            salary: "₹40,000 - ₹70,000/month".to_string(),
            posted_date: anchor - Duration::days(3),
            logo: "https://images.unsplash.com/photo-1522071820081-009f0129c71c?w=64&h=64&auto=format&fit=crop".to_string(),
            description: "Develop web applications using modern technologies. We're committed to inclusive hiring and provide necessary accommodations for developers with visual impairments.".to_string(),
            requirements: strings(&["JavaScript/TypeScript experience", "React knowledge", "Problem-solving abilities"]),
            benefits: strings(&["Comprehensive health insurance", "Skill development budget", "Team outings"]),
            accessibility: strings(&["Screen reader technology", "Braille displays", "Voice recognition software"]),
            featured: true,
            application_url: "https://infotechsolutions.in/careers/software-developer".to_string(),
        },
        Job {
            id: "5".to_string(),
            title: "HR Coordinator".to_string(),
            company: "Global Services India".to_string(),
            location: "Delhi NCR".to_string(),
            job_type: JobType::FullTime,
            salary: "₹25,000 - ₹40,000/month".to_string(),
            posted_date: anchor - Duration::days(10),
            logo: "https://images.unsplash.com/photo-1551434678-e076c223a692?w=64&h=64&auto=format&fit=crop".to_string(),
            description: "Coordinate HR activities including recruitment and employee engagement. Our office is designed to be accessible for all types of disabilities.".to_string(),
            requirements: strings(&["HR background", "Good interpersonal skills", "Knowledge of labor laws"]),
            benefits: strings(&["Health and dental coverage", "Professional development", "Wellness programs"]),
            accessibility: strings(&["Accessible bathrooms", "Elevators", "Inclusive culture"]),
            featured: false,
            application_url: "https://globalservicesindia.com/careers/hr-coordinator".to_string(),
        },
    ]
}

/// The four sample senior living facilities.
pub fn fixture_housing() -> Vec<SeniorLiving> {
    vec![
        SeniorLiving {
            id: "1".to_string(),
            name: "Ananda Vihar Retirement Village".to_string(),
            housing_type: HousingType::RetirementCommunity,
            location: "Pune, Maharashtra".to_string(),
            address: "12 Koregaon Park Road, Pune 411001".to_string(),
            price: "₹45,000/month".to_string(),
            monthly_rate: Some(45_000),
            image: "https://images.unsplash.com/photo-1576765608535-5f04d1e3f289?w=800&auto=format&fit=crop".to_string(),
            amenities: strings(&["Meals included", "Yoga classes", "Library", "Garden"]),
            accessibility: strings(&["Wheelchair ramps", "Grab bars", "Elevators"]),
            rating: 4.7,
            review_count: 128,
            description: "A gated community with independent cottages, daily activities and an on-site clinic.".to_string(),
            contact: Contact {
                phone: "+91 20 4000 1200".to_string(),
                email: "care@anandavihar.in".to_string(),
                website: "https://anandavihar.in".to_string(),
            },
            openings: true,
            featured: true,
        },
        SeniorLiving {
            id: "2".to_string(),
            name: "Sukoon Assisted Living".to_string(),
            housing_type: HousingType::AssistedLiving,
            location: "Bangalore, Karnataka".to_string(),
            address: "88 Indiranagar 2nd Stage, Bangalore 560038".to_string(),
            price: "₹60,000/month".to_string(),
            monthly_rate: Some(60_000),
            image: "https://images.unsplash.com/photo-1559526324-593bc073d938?w=800&auto=format&fit=crop".to_string(),
            amenities: strings(&["Meals included", "24/7 nursing", "Physiotherapy"]),
            accessibility: strings(&["Wheelchair ramps", "Hearing loops", "Braille signage"]),
            rating: 4.5,
            review_count: 86,
            description: "Round-the-clock assistance with daily living in a calm residential neighbourhood.".to_string(),
            contact: Contact {
                phone: "+91 80 2525 7788".to_string(),
                email: "hello@sukoonliving.in".to_string(),
                website: "https://sukoonliving.in".to_string(),
            },
            openings: true,
            featured: false,
        },
        SeniorLiving {
            id: "3".to_string(),
            name: "Smriti Memory Care Home".to_string(),
            housing_type: HousingType::MemoryCare,
            location: "Chennai, Tamil Nadu".to_string(),
            address: "5 Besant Nagar 3rd Avenue, Chennai 600090".to_string(),
            price: "₹75,000/month".to_string(),
            monthly_rate: Some(75_000),
            image: "https://images.unsplash.com/photo-1586105251261-72a756497a11?w=800&auto=format&fit=crop".to_string(),
            amenities: strings(&["24/7 nursing", "Secure garden", "Music therapy"]),
            accessibility: strings(&["Grab bars", "Non-slip flooring", "Elevators"]),
            rating: 4.8,
            review_count: 54,
            description: "Specialised dementia care with trained staff and structured daily routines.".to_string(),
            contact: Contact {
                phone: "+91 44 2491 3300".to_string(),
                email: "admissions@smriticare.in".to_string(),
                website: "https://smriticare.in".to_string(),
            },
            openings: false,
            featured: true,
        },
        SeniorLiving {
            id: "4".to_string(),
            name: "Prakriti Independent Residences".to_string(),
            housing_type: HousingType::IndependentLiving,
            location: "Dehradun, Uttarakhand".to_string(),
            address: "21 Rajpur Road, Dehradun 248001".to_string(),
            price: "₹30,000/month".to_string(),
            monthly_rate: Some(30_000),
            image: "https://images.unsplash.com/photo-1600585154340-be6161a56a0c?w=800&auto=format&fit=crop".to_string(),
            amenities: strings(&["Garden", "Community kitchen", "Library"]),
            accessibility: strings(&["Step-free entrances", "Grab bars"]),
            rating: 4.2,
            review_count: 37,
            description: "Private apartments for active seniors in the foothills, with shared community spaces.".to_string(),
            contact: Contact {
                phone: "+91 135 274 9900".to_string(),
                email: "stay@prakritiresidences.in".to_string(),
                website: "https://prakritiresidences.in".to_string(),
            },
            openings: true,
            featured: false,
        },
    ]
}

/// The six sample match profiles, `last_active` relative to `anchor`.
pub fn fixture_profiles(anchor: DateTime<Utc>) -> Vec<MatchProfile> {
    let profile = |id: &str,
                   name: &str,
                   age: u32,
                   gender: &str,
                   location: &str,
                   about: &str,
                   looking_for: &[&str],
                   interests: &[&str],
                   photo: &str,
                   days_ago: i64| MatchProfile {
        id: id.to_string(),
        name: name.to_string(),
        age,
        gender: gender.to_string(),
        location: location.to_string(),
        about: about.to_string(),
        looking_for: strings(looking_for),
        interests: strings(interests),
        photos: vec![photo.to_string()],
        last_active: anchor - Duration::days(days_ago),
        compatibility_score: None,
    };

    vec![
        profile(
            "1",
            "Raj Sharma",
            32,
            "male",
            "Mumbai, Maharashtra",
            "I'm a software developer with a hearing impairment. I love reading, traveling, and exploring new cuisines. Looking for someone who shares similar interests and values family.",
            &["marriage", "companionship"],
            &["technology", "reading", "travel", "cooking"],
            "https://images.unsplash.com/photo-1531427186611-ecfd6d936c79?w=400&h=400&auto=format&fit=crop",
            0,
        ),
        profile(
            "2",
            "Priya Patel",
            28,
            "female",
            "Ahmedabad, Gujarat",
            "I'm an artist with partial visual impairment. I enjoy painting, classical music, and spending time with friends. Seeking a caring partner who appreciates art and culture.",
            &["marriage"],
            &["art", "music", "culture", "yoga"],
            "https://images.unsplash.com/photo-1494790108377-be9c29b29330?w=400&h=400&auto=format&fit=crop",
            2,
        ),
        profile(
            "3",
            "Vikram Singh",
            35,
            "male",
            "Delhi NCR",
            "I'm a government employee with a mobility disability. I enjoy watching cricket, reading history books, and attending cultural events. Looking for a life partner who is understanding and supportive.",
            &["marriage", "friendship"],
            &["cricket", "history", "politics", "movies"],
            "https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?w=400&h=400&auto=format&fit=crop",
            5,
        ),
        profile(
            "4",
            "Anjali Desai",
            30,
            "female",
            "Bangalore, Karnataka",
            "I work in digital marketing and have a speech impairment. I'm passionate about travel, photography, and learning new languages. Looking for someone who is patient, kind, and adventurous.",
            &["marriage", "companionship"],
            &["travel", "photography", "languages", "hiking"],
            "https://images.unsplash.com/photo-1534528741775-53994a69daeb?w=400&h=400&auto=format&fit=crop",
            1,
        ),
        profile(
            "5",
            "Arjun Reddy",
            33,
            "male",
            "Hyderabad, Telangana",
            "I'm a teacher with a mild learning disability. I enjoy reading philosophy, playing chess, and volunteering. Seeking a compassionate partner who values education and community service.",
            &["marriage", "friendship"],
            &["philosophy", "chess", "volunteering", "teaching"],
            "https://images.unsplash.com/photo-1500648767791-00dcc994a43e?w=400&h=400&auto=format&fit=crop",
            3,
        ),
        profile(
            "6",
            "Meera Iyer",
            29,
            "female",
            "Chennai, Tamil Nadu",
            "I'm an accountant with a physical disability. I love classical dance, reading Tamil literature, and exploring spirituality. Looking for someone who respects traditions and has a positive outlook.",
            &["marriage"],
            &["dance", "literature", "spirituality", "music"],
            "https://images.unsplash.com/photo-1544005313-94ddf0286df2?w=400&h=400&auto=format&fit=crop",
            4,
        ),
    ]
}
