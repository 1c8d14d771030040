//! Built-in rule table for the career assistant.
//!
//! Rules are evaluated top to bottom and the first one with a matching trigger wins.
//! Several triggers overlap ("help" in the greeting rule vs "help me" in tips), so
//! reordering this table changes behaviour.
//!
//! Every trigger is a plain substring except `hi` and `intern`, which must stand alone:
//! "this" would otherwise read as a greeting and "interns" would shadow the salary rule.

use serde::{Deserialize, Serialize};

/// Topic tag attached to each rule. Surfaced in API responses and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    Greeting,
    JobSearch,
    Applying,
    Profile,
    Resume,
    SavedJobs,
    Internships,
    Interviews,
    Salary,
    RemoteWork,
    TechnicalIssues,
    Companies,
    Dashboard,
    Tips,
    Account,
    JobCategories,
    SuccessStories,
}

impl Topic {
    pub fn as_str(&self) -> &'static str {
        match self {
            Topic::Greeting => "greeting",
            Topic::JobSearch => "job_search",
            Topic::Applying => "applying",
            Topic::Profile => "profile",
            Topic::Resume => "resume",
            Topic::SavedJobs => "saved_jobs",
            Topic::Internships => "internships",
            Topic::Interviews => "interviews",
            Topic::Salary => "salary",
            Topic::RemoteWork => "remote_work",
            Topic::TechnicalIssues => "technical_issues",
            Topic::Companies => "companies",
            Topic::Dashboard => "dashboard",
            Topic::Tips => "tips",
            Topic::Account => "account",
            Topic::JobCategories => "job_categories",
            Topic::SuccessStories => "success_stories",
        }
    }
}

/// A lower-case fragment whose presence in normalized input activates its rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Matches anywhere in the input.
    Phrase(&'static str),
    /// Matches only when not embedded in a longer alphanumeric run
    /// ("hi" fires on "hi, there" but not on "this").
    Word(&'static str),
}

impl Trigger {
    pub fn text(&self) -> &'static str {
        match self {
            Trigger::Phrase(t) | Trigger::Word(t) => *t,
        }
    }

    /// `normalized` must already be lower-cased.
    pub fn is_present_in(&self, normalized: &str) -> bool {
        let t = self.text();
        match self {
            Trigger::Phrase(_) => normalized.contains(t),
            Trigger::Word(_) => normalized.match_indices(t).any(|(start, m)| {
                let before = normalized[..start].chars().next_back();
                let after = normalized[start + m.len()..].chars().next();
                !before.is_some_and(char::is_alphanumeric)
                    && !after.is_some_and(char::is_alphanumeric)
            }),
        }
    }
}

/// One entry of the ordered rule table.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub topic: Topic,
    pub triggers: &'static [Trigger],
    pub response: &'static str,
}

impl Rule {
    /// True if any trigger is present (logical OR).
    pub fn matches(&self, normalized: &str) -> bool {
        self.triggers.iter().any(|t| t.is_present_in(normalized))
    }
}

use Trigger::{Phrase as P, Word as W};

pub static RULES: &[Rule] = &[
    Rule {
        topic: Topic::Greeting,
        triggers: &[
            W("hi"),
            P("hello"),
            P("hey"),
            P("good morning"),
            P("good afternoon"),
            P("good evening"),
            P("help"),
        ],
        response: "Hi there! 👋 I'm here to help you with your job search. You can ask me about \
            finding jobs, creating your profile, applying for positions, or navigating the website. \
            How can I assist you today?",
    },
    Rule {
        topic: Topic::JobSearch,
        triggers: &[
            P("find jobs"),
            P("search jobs"),
            P("job search"),
            P("looking for work"),
            P("how to find"),
            P("where to find"),
        ],
        response: "To find jobs on our platform: 📍 Use the search bar at the top to enter job titles \
            or keywords 🌍 Add your location to filter nearby opportunities 🔍 Browse through the \
            results and click on jobs that interest you. Need help with something specific?",
    },
    Rule {
        topic: Topic::Applying,
        triggers: &[
            P("how to apply"),
            P("how do i apply"),
            P("apply for"),
            P("application process"),
            P("applying"),
        ],
        response: "Applying is easy! 📝 Click on any job posting that interests you 👀 Review the job \
            description and requirements 🚀 Click the 'Apply Now' button 📄 Upload your resume and \
            fill out the application form. Make sure your profile is complete for better chances!",
    },
    Rule {
        topic: Topic::Profile,
        triggers: &[P("profile")],
        response: "Your profile is your digital resume! ✨ Go to your profile section 📝 Fill in your \
            education, skills, and experience 📄 Upload your resume 🎯 Add a professional photo. \
            A complete profile gets 3x more employer views!",
    },
    Rule {
        topic: Topic::Resume,
        triggers: &[P("resume"), P("cv"), P("cover letter")],
        response: "Here are some key tips for your resume:\n\n\
            • Keep it concise (1-2 pages max)\n\
            • Use action verbs and quantify achievements\n\
            • Tailor it to each job application\n\
            • Include relevant keywords from job descriptions\n\
            • Proofread carefully for errors\n\
            • Use a clean, professional format\n\n\
            Would you like specific advice for any section of your resume?",
    },
    Rule {
        topic: Topic::SavedJobs,
        triggers: &[
            P("save job"),
            P("saved job"),
            P("bookmark"),
            P("save for later"),
            P("favorite"),
            P("heart icon"),
        ],
        response: "You can save jobs to apply later! 💾 Click the heart/bookmark icon on any job \
            posting 📋 Find your saved jobs in the 'Saved Jobs' section 🔔 You'll get notifications \
            if saved jobs have updates or deadlines approaching.",
    },
    Rule {
        topic: Topic::Internships,
        triggers: &[
            P("internship"),
            W("intern"),
            P("summer job"),
            P("part-time"),
            P("part time"),
        ],
        response: "Looking for internships? Great choice! 🎓 Use the job type filter to select \
            'Internships' 📅 Many companies post summer internships in spring 💼 Consider both paid \
            and unpaid opportunities for experience. Check our internship section for the latest \
            opportunities!",
    },
    Rule {
        topic: Topic::Interviews,
        triggers: &[P("interview")],
        response: "Great question about interviews! For comprehensive interview preparation, I \
            recommend using our AI Interview Prep system. You can find it in the 'Interview Prep' \
            tab above. It offers:\n\n\
            • Role-specific question generation\n\
            • Speech recognition for practice\n\
            • Real-time feedback and scoring\n\
            • Company-specific insights\n\
            • Progress tracking\n\n\
            Would you like me to help you with any specific interview topic?",
    },
    Rule {
        topic: Topic::Salary,
        triggers: &[
            P("salary"),
            P("pay"),
            P("wage"),
            P("how much"),
            P("money"),
            P("stipend"),
        ],
        response: "Salary varies by role and location! 💰 Check individual job postings for salary \
            ranges 📊 Entry-level positions typically range $30k-50k 🌟 Internships may be $15-25/hour \
            📈 Your skills and education affect offers. Negotiate respectfully!",
    },
    Rule {
        topic: Topic::RemoteWork,
        triggers: &[
            P("remote"),
            P("work from home"),
            P("virtual"),
            P("online"),
            P("wfh"),
            P("hybrid"),
        ],
        response: "Remote work is popular! 🏠 Use location filter and select 'Remote' 💻 Many \
            companies offer hybrid options 🌍 Remote jobs often have more competition ⚡ Make sure \
            you have good internet and workspace. Filter by 'Remote' to see all virtual opportunities!",
    },
    Rule {
        topic: Topic::TechnicalIssues,
        triggers: &[
            P("not working"),
            P("error"),
            P("problem"),
            P("bug"),
            P("broken"),
            P("issue"),
            P("cant access"),
            P("can't access"),
        ],
        response: "Sorry you're having trouble! 🔧 Try refreshing the page or clearing your browser \
            cache 📱 Make sure you're using a supported browser 💬 Contact our support team at \
            support@studentjobs.com for technical issues. I'm here for general questions!",
    },
    Rule {
        topic: Topic::Companies,
        triggers: &[
            P("companies"),
            P("employers"),
            P("company list"),
            P("who hires"),
        ],
        response: "We partner with amazing companies! 🏢 Browse job postings to see all employers 🌟 \
            We have startups, Fortune 500s, and everything in between 🎯 Use company size filters to \
            find your preferred work environment. Check individual company profiles for more details!",
    },
    Rule {
        topic: Topic::Dashboard,
        triggers: &[P("dashboard")],
        response: "Your Dashboard is your personal job search hub! Here you can:\n\n\
            • View all your saved/favorite jobs\n\
            • Track your application history\n\
            • See application status updates\n\
            • Monitor your job search activity\n\
            • Access interview preparation tools\n\
            • View your progress statistics\n\n\
            Make sure you're signed in to access all dashboard features!",
    },
    Rule {
        topic: Topic::Tips,
        // "help me" is shadowed by the greeting rule's "help".
        triggers: &[
            P("tips"),
            P("advice"),
            P("suggestions"),
            P("help me"),
            P("what should i do"),
        ],
        response: "Here are some great job search tips! 🌟 Keep your profile updated 📝 Apply within \
            48 hours of job posting 🎯 Customize your applications for each role ⭐ Follow up \
            professionally 📊 Track your applications. What specific area would you like tips on?",
    },
    Rule {
        topic: Topic::Account,
        triggers: &[
            P("login"),
            P("log in"),
            P("sign in"),
            P("password"),
            P("account"),
            P("register"),
            P("sign up"),
        ],
        response: "Having account issues? 🔐 Use the 'Sign In' button at the top right 📧 Check your \
            email for verification links 🔄 Use 'Forgot Password' if needed 📞 Contact support if \
            you're still having trouble. Need help with anything else?",
    },
    Rule {
        topic: Topic::JobCategories,
        triggers: &[
            P("job types"),
            P("categories"),
            P("what jobs"),
            P("available jobs"),
            P("fields"),
            P("industries"),
        ],
        response: "We have opportunities in many fields! 💻 Technology & IT 📈 Marketing & Sales 🏥 \
            Healthcare 📚 Education 🎨 Creative & Design 🔬 Research 🏭 Manufacturing and more! Use \
            our category filters to explore specific industries.",
    },
    Rule {
        topic: Topic::SuccessStories,
        triggers: &[
            P("success"),
            P("testimonials"),
            P("reviews"),
            P("stories"),
            P("does this work"),
        ],
        response: "Yes, we help students find great opportunities! 🎉 Over 10,000 students have found \
            jobs through our platform ⭐ 4.8/5 average rating from users 💼 85% of users find jobs \
            within 3 months 📈 Many go on to full-time roles. You're in good hands!",
    },
];

/// Generic replies for input no rule recognizes. One is drawn uniformly per miss.
pub static FALLBACK_REPLIES: &[&str] = &[
    "I understand you're asking about career-related topics. I can help you with:\n\n\
        • Job search strategies and tips\n\
        • Resume and cover letter advice\n\
        • Interview preparation and practice\n\
        • Using StudentJobs platform features\n\
        • Career development guidance\n\
        • Company research and insights\n\n\
        For comprehensive interview preparation, check out our AI Interview Prep system in the tab \
        above. What specific area would you like help with?",
    "I'm still learning! 🤖 Could you rephrase that? I can help with job searching, applications, \
        profiles, interviews, and general website questions.",
    "That's a great question! For detailed help, try browsing our FAQ section or contact our \
        support team. I'm best at helping with job search basics!",
    "I'd love to help! Try asking about finding jobs, creating your profile, or how to apply for \
        positions. What would you like to know?",
];

/// Assistant message that opens every chat session.
pub const WELCOME_MESSAGE: &str = "Hi there! 👋 I'm your AI career assistant. I can help you with \
    job search advice, resume tips, interview preparation, and answer questions about our \
    StudentJobs platform. How can I assist you today?";

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_word_trigger_ignores_embedded_occurrence() {
        let hi = Trigger::Word("hi");
        assert!(!hi.is_present_in("how do i apply for this job?"));
        assert!(!hi.is_present_in("which companies"));
        assert!(hi.is_present_in("hi, can you help"));
        assert!(hi.is_present_in("oh hi"));
        assert!(hi.is_present_in("hi"));
    }

    #[test]
    fn test_word_trigger_checks_every_occurrence() {
        // First "hey" is inside "they", second stands alone.
        assert!(Trigger::Word("hey").is_present_in("they said hey"));
    }

    #[test]
    fn test_phrase_trigger_matches_inside_words() {
        assert!(Trigger::Phrase("intern").is_present_in("interns"));
        assert!(Trigger::Phrase("help").is_present_in("helpful"));
    }

    #[test]
    fn test_word_trigger_treats_punctuation_as_boundary() {
        assert!(Trigger::Word("cv").is_present_in("my cv."));
        assert!(Trigger::Word("pay").is_present_in("(pay)"));
        assert!(!Trigger::Word("pay").is_present_in("repayment"));
    }

    #[test]
    fn test_all_triggers_are_lowercase_and_nonempty() {
        for rule in RULES {
            assert!(!rule.triggers.is_empty(), "{:?} has no triggers", rule.topic);
            for trigger in rule.triggers {
                let text = trigger.text();
                assert!(!text.is_empty());
                assert_eq!(text, text.to_lowercase(), "trigger {text:?} must be lower-case");
            }
        }
    }

    #[test]
    fn test_each_topic_appears_once() {
        let topics: HashSet<Topic> = RULES.iter().map(|r| r.topic).collect();
        assert_eq!(topics.len(), RULES.len());
    }

    #[test]
    fn test_responses_and_fallbacks_nonempty() {
        assert!(RULES.iter().all(|r| !r.response.trim().is_empty()));
        assert_eq!(FALLBACK_REPLIES.len(), 4);
        assert!(FALLBACK_REPLIES.iter().all(|f| !f.trim().is_empty()));
    }

    #[test]
    fn test_topic_as_str_matches_serde() {
        for rule in RULES {
            let json = serde_json::to_string(&rule.topic).unwrap();
            assert_eq!(json, format!("\"{}\"", rule.topic.as_str()));
        }
    }
}
