use crate::domain::model::{QuizCategory, QuizQuestion};

#[derive(Debug, Clone, Copy)]
pub struct CuratedQuestion {
    pub prompt: &'static str,
    pub answer: &'static str,
    pub explanation: &'static str,
    pub options: [&'static str; 4],
}

impl CuratedQuestion {
    const fn new(
        prompt: &'static str,
        answer: &'static str,
        explanation: &'static str,
        options: [&'static str; 4],
    ) -> Self {
        Self {
            prompt,
            answer,
            explanation,
            options,
        }
    }

    /// Options keep the order they were written in.
    pub fn to_question(&self, category: QuizCategory) -> QuizQuestion {
        QuizQuestion {
            prompt: self.prompt.to_string(),
            correct_answer: self.answer.to_string(),
            options: self.options.iter().map(|o| o.to_string()).collect(),
            explanation: self.explanation.to_string(),
            category,
        }
    }
}

pub const IP_ADDRESSING: &[CuratedQuestion] = &[
    CuratedQuestion::new(
        "What class is IP 10.0.0.1?",
        "Class A",
        "IPs 1-126 are Class A.",
        ["Class A", "Class B", "Class C", "Class D"],
    ),
    CuratedQuestion::new(
        "What class is IP 172.16.0.1?",
        "Class B",
        "IPs 128-191 are Class B.",
        ["Class A", "Class B", "Class C", "Class D"],
    ),
    CuratedQuestion::new(
        "What class is IP 192.168.1.1?",
        "Class C",
        "IPs 192-223 are Class C.",
        ["Class A", "Class B", "Class C", "Class D"],
    ),
    CuratedQuestion::new(
        "What is the loopback address?",
        "127.0.0.1",
        "127.0.0.1 is reserved for loopback.",
        ["127.0.0.1", "192.168.0.1", "10.0.0.1", "0.0.0.0"],
    ),
    CuratedQuestion::new(
        "How many bits in an IPv4 address?",
        "32",
        "IPv4 uses 32 bits (4 octets × 8 bits).",
        ["16", "32", "64", "128"],
    ),
    CuratedQuestion::new(
        "What is the broadcast address for 192.168.1.0/24?",
        "192.168.1.255",
        "With /24, the last octet is all 1s = 255.",
        ["192.168.1.255", "192.168.1.0", "192.168.1.1", "192.168.0.255"],
    ),
    CuratedQuestion::new(
        "Which of these addresses is private?",
        "10.20.30.40",
        "10.0.0.0/8 is one of the three RFC 1918 private ranges.",
        ["10.20.30.40", "8.8.8.8", "172.32.0.1", "193.0.0.1"],
    ),
    CuratedQuestion::new(
        "What is 11000000 in decimal, the first octet of 192.168.0.1?",
        "192",
        "128 + 64 = 192.",
        ["192", "168", "128", "224"],
    ),
];

pub const SUBNETTING: &[CuratedQuestion] = &[
    CuratedQuestion::new(
        "How many hosts in a /24 network?",
        "254",
        "/24 = 256 addresses - 2 (network + broadcast) = 254.",
        ["254", "256", "128", "252"],
    ),
    CuratedQuestion::new(
        "What subnet mask is /16?",
        "255.255.0.0",
        "/16 means first 16 bits are 1s.",
        ["255.255.0.0", "255.0.0.0", "255.255.255.0", "255.255.128.0"],
    ),
    CuratedQuestion::new(
        "What CIDR is 255.255.255.0?",
        "/24",
        "255.255.255.0 has 24 bits set to 1.",
        ["/24", "/16", "/8", "/32"],
    ),
    CuratedQuestion::new(
        "How many subnets with /26?",
        "4",
        "/26 borrows 2 bits from /24, giving 2² = 4 subnets.",
        ["2", "4", "8", "16"],
    ),
    CuratedQuestion::new(
        "What is the network address of 192.168.1.130/25?",
        "192.168.1.128",
        "/25 splits at 128. 130 > 128, so network is .128.",
        ["192.168.1.128", "192.168.1.0", "192.168.1.64", "192.168.1.192"],
    ),
    CuratedQuestion::new(
        "What subnet mask is /26?",
        "255.255.255.192",
        "26 one-bits: the last octet is 11000000 = 192.",
        ["255.255.255.192", "255.255.255.128", "255.255.255.224", "255.255.255.0"],
    ),
    CuratedQuestion::new(
        "How many usable hosts does a /30 provide?",
        "2",
        "/30 leaves 2 host bits: 4 addresses - 2 = 2.",
        ["2", "4", "6", "1"],
    ),
];

pub const PROTOCOLS: &[CuratedQuestion] = &[
    CuratedQuestion::new(
        "What protocol resolves IP to MAC?",
        "ARP",
        "ARP (Address Resolution Protocol) maps IP → MAC.",
        ["ARP", "DNS", "DHCP", "ICMP"],
    ),
    CuratedQuestion::new(
        "What protocol does ping use?",
        "ICMP",
        "Ping uses ICMP Echo Request/Reply.",
        ["ICMP", "TCP", "UDP", "ARP"],
    ),
    CuratedQuestion::new(
        "What layer does a router operate at?",
        "Layer 3",
        "Routers work at the Network layer (Layer 3).",
        ["Layer 1", "Layer 2", "Layer 3", "Layer 4"],
    ),
    CuratedQuestion::new(
        "What layer does a switch operate at?",
        "Layer 2",
        "Switches work at the Data Link layer (Layer 2).",
        ["Layer 1", "Layer 2", "Layer 3", "Layer 4"],
    ),
    CuratedQuestion::new(
        "What does DHCP provide?",
        "IP addresses",
        "DHCP automatically assigns IP addresses.",
        ["IP addresses", "MAC addresses", "Domain names", "Encryption"],
    ),
    CuratedQuestion::new(
        "What port does HTTP use?",
        "80",
        "HTTP uses port 80 by default.",
        ["80", "443", "21", "25"],
    ),
    CuratedQuestion::new(
        "What does DNS resolve?",
        "Domain to IP",
        "DNS translates domain names to IP addresses.",
        ["Domain to IP", "IP to MAC", "MAC to IP", "Port to IP"],
    ),
    CuratedQuestion::new(
        "Which transport protocol guarantees ordered delivery?",
        "TCP",
        "TCP numbers segments and retransmits lost ones; UDP does neither.",
        ["UDP", "TCP", "ICMP", "ARP"],
    ),
];

/// Scenario questions for the daily challenge. Everyone sees the same ones on a given day.
pub const DAILY_CHALLENGE: &[CuratedQuestion] = &[
    CuratedQuestion::new(
        "A host has IP 192.168.10.77/26. What is its network address?",
        "192.168.10.64",
        "/26 blocks are 64 wide: 0, 64, 128, 192. 77 falls in the .64 block.",
        ["192.168.10.0", "192.168.10.64", "192.168.10.77", "192.168.10.128"],
    ),
    CuratedQuestion::new(
        "A MAC address byte reads 0xFE. What is it in decimal?",
        "254",
        "F = 15, E = 14: 15 × 16 + 14 = 254.",
        ["254", "255", "240", "238"],
    ),
    CuratedQuestion::new(
        "You need 50 hosts per subnet. What is the smallest prefix that fits?",
        "/26",
        "/26 gives 64 - 2 = 62 usable hosts; /27 only gives 30.",
        ["/24", "/25", "/26", "/27"],
    ),
    CuratedQuestion::new(
        "A browser loads https://example.com. Which port does the server listen on?",
        "443",
        "HTTPS uses TCP port 443 by default.",
        ["80", "443", "8080", "22"],
    ),
    CuratedQuestion::new(
        "Permissions are written in octal as 755. What is the owner digit in binary?",
        "111",
        "7 = 4 + 2 + 1 = 111: read, write and execute.",
        ["101", "110", "111", "011"],
    ),
    CuratedQuestion::new(
        "Two PCs on the same switch can't reach each other by IP, but ping to MAC works at Layer 2. Which protocol should you check first?",
        "ARP",
        "Without ARP resolving IP to MAC, frames never get addressed correctly.",
        ["DNS", "ARP", "DHCP", "HTTP"],
    ),
    CuratedQuestion::new(
        "What is the broadcast address of 10.0.0.0/30?",
        "10.0.0.3",
        "/30 has 4 addresses: .0 network, .1 and .2 hosts, .3 broadcast.",
        ["10.0.0.1", "10.0.0.2", "10.0.0.3", "10.0.0.255"],
    ),
    CuratedQuestion::new(
        "How many bits are needed to count up to 1000?",
        "10",
        "2^10 = 1024 is the first power of two above 1000.",
        ["8", "9", "10", "12"],
    ),
    CuratedQuestion::new(
        "An IPv6 group reads 0x00FF. What is it in decimal?",
        "255",
        "Leading zeros don't change the value: FF = 15 × 16 + 15 = 255.",
        ["255", "256", "15", "65535"],
    ),
    CuratedQuestion::new(
        "A laptop joins Wi-Fi and gets 169.254.3.9. What most likely failed?",
        "DHCP",
        "169.254.0.0/16 is the link-local fallback used when no DHCP lease is obtained.",
        ["DNS", "DHCP", "ARP", "NAT"],
    ),
    CuratedQuestion::new(
        "Which subnet mask allows exactly 14 usable hosts?",
        "255.255.255.240",
        "/28 leaves 4 host bits: 16 - 2 = 14.",
        ["255.255.255.248", "255.255.255.240", "255.255.255.224", "255.255.255.252"],
    ),
    CuratedQuestion::new(
        "What is binary 1111 0000 in hex?",
        "F0",
        "Each nibble maps to one hex digit: 1111 = F, 0000 = 0.",
        ["0F", "F0", "FF", "E0"],
    ),
];
